// bases/identify_cli/src/app.rs
use std::sync::Arc;

use audio_fingerprint::{ChromaprintGenerator, FingerprintGenerator};
use catalog_oracle::{Catalog, CatalogOracle};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use match_session::{MatchSession, ResultSet};

use crate::config::Config;
use crate::output::OutputHandler;

pub struct App {
    config: Config,
    output: OutputHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let output = OutputHandler::new(config.verbose);
        Self { config, output }
    }

    pub async fn run(&self) -> Result<()> {
        let results = self.identify().await?;

        if let Some(path) = &self.config.output {
            self.output
                .save_results(path, &results)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        }
        self.output
            .print_results(&results)
            .wrap_err("failed to write results")?;

        Ok(())
    }

    /// Load the recording, open a session against the catalog and sweep it
    pub async fn identify(&self) -> Result<ResultSet> {
        let input = self.config.input.clone();
        let recording = tokio::task::spawn_blocking(move || sample_buffer::load(input))
            .await?
            .wrap_err_with(|| format!("failed to load {}", self.config.input.display()))?;

        let generator: Arc<dyn FingerprintGenerator> = Arc::new(ChromaprintGenerator::new());

        let catalog_dir = self.config.catalog_dir.clone();
        let catalog_generator = Arc::clone(&generator);
        let catalog = tokio::task::spawn_blocking(move || {
            Catalog::build(catalog_dir, catalog_generator.as_ref())
        })
        .await?
        .wrap_err("failed to open match session")?;
        if catalog.is_empty() {
            tracing::warn!(
                "Catalog at {} has no usable recordings; nothing can match",
                self.config.catalog_dir.display()
            );
        }

        let oracle = CatalogOracle::new(Arc::new(catalog), Arc::clone(&generator))
            .with_min_match_secs(self.config.min_match_secs);
        let session = MatchSession::new(Arc::new(oracle), generator);

        let report = session.sweep(&recording, &self.config.sweep).await;
        tracing::info!(
            "Submitted {}/{} window(s), skipped {}",
            report.windows_submitted(),
            report.windows_planned(),
            report.windows_skipped()
        );

        Ok(report.into_result_set())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }
}
