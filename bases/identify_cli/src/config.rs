// bases/identify_cli/src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use match_session::{SessionError, SweepSettings};

use crate::args::CliArgs;

/// Validated settings for one identification run
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub sweep: SweepSettings,
    pub catalog_dir: PathBuf,
    pub min_match_secs: f32,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl Config {
    pub fn from_args(args: CliArgs) -> Result<Self, SessionError> {
        let timeout = Duration::try_from_secs_f64(args.timeout).map_err(|_| {
            SessionError::InvalidSettings(format!(
                "timeout must be a non-negative number of seconds, got {}",
                args.timeout
            ))
        })?;

        let sweep = SweepSettings {
            chunk_secs: args.chunk,
            overlap_secs: args.overlap,
            timeout,
        };
        sweep.validate()?;

        if !args.min_match.is_finite() || args.min_match < 0.0 {
            return Err(SessionError::InvalidSettings(format!(
                "min-match must be zero or more seconds, got {}",
                args.min_match
            )));
        }

        Ok(Self {
            input: args.input,
            sweep,
            catalog_dir: args.catalog,
            min_match_secs: args.min_match,
            output: args.output,
            verbose: args.verbose,
        })
    }

    /// Filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "identify=debug,match_session=debug,catalog_oracle=debug,sample_buffer=debug,audio_fingerprint=debug"
        } else {
            "warn"
        }
    }
}
