// bases/identify_cli/src/args.rs
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Identify the songs playing in an audio recording
#[derive(Parser, Debug, Clone)]
#[command(name = "identify", author, version, about, long_about = None, allow_negative_numbers = true)]
pub struct CliArgs {
    /// Recording to identify
    pub input: PathBuf,

    /// Length of each analysis window, in seconds
    #[arg(long, default_value_t = 20.0)]
    pub chunk: f64,

    /// Time shared by consecutive windows, in seconds
    #[arg(long, default_value_t = 5.0)]
    pub overlap: f64,

    /// How long to wait for the oracle on each submission, in seconds
    #[arg(long, default_value_t = 6.0)]
    pub timeout: f64,

    /// Directory of reference recordings to identify against
    #[arg(long, default_value = "catalog")]
    pub catalog: PathBuf,

    /// Shortest stretch of agreeing audio that counts as a match, in seconds
    #[arg(long = "min-match", default_value_t = 5.0)]
    pub min_match: f32,

    /// Also write the result lines to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

const VALUE_FLAGS: &[&str] = &[
    "--chunk",
    "--overlap",
    "--timeout",
    "--catalog",
    "--min-match",
    "--output",
    "-o",
];

const SWITCHES: &[&str] = &["--verbose", "-v", "--help", "-h", "--version", "-V"];

/// Split the raw command line into what clap should see and what is ignored.
///
/// Unrecognized flags and any positional after the recording path are
/// dropped rather than rejected. An unrecognized `--flag value` pair in
/// front of the recording path is dropped as a whole.
pub fn retain_known(raw: impl IntoIterator<Item = OsString>) -> (Vec<OsString>, Vec<OsString>) {
    let mut tokens: Vec<OsString> = raw.into_iter().collect();
    let rest = if tokens.is_empty() {
        Vec::new()
    } else {
        tokens.split_off(1)
    };
    let mut kept = tokens;
    let mut ignored = Vec::new();
    let mut seen_input = false;

    let mut index = 0;
    while index < rest.len() {
        let token = &rest[index];
        let text = token.to_string_lossy();
        index += 1;

        if text == "--" {
            // Everything after the separator is positional
            for positional in &rest[index..] {
                if seen_input {
                    ignored.push(positional.clone());
                } else {
                    seen_input = true;
                    kept.push(OsString::from("--"));
                    kept.push(positional.clone());
                }
            }
            break;
        }

        if !is_flag(&text) {
            if seen_input {
                ignored.push(token.clone());
            } else {
                seen_input = true;
                kept.push(token.clone());
            }
            continue;
        }

        let (name, inline_value) = flag_name(&text);
        if VALUE_FLAGS.contains(&name) {
            kept.push(token.clone());
            if !inline_value {
                if let Some(value) = rest.get(index) {
                    kept.push(value.clone());
                    index += 1;
                }
            }
        } else if SWITCHES.contains(&name) {
            kept.push(token.clone());
        } else {
            ignored.push(token.clone());
            // `--format json rec.wav`: the bare word belongs to the unknown flag
            let takes_next = !seen_input
                && !inline_value
                && text.starts_with("--")
                && rest
                    .get(index)
                    .is_some_and(|next| !is_flag(&next.to_string_lossy()))
                && has_positional(&rest[index + 1..]);
            if takes_next {
                ignored.push(rest[index].clone());
                index += 1;
            }
        }
    }

    (kept, ignored)
}

fn is_flag(text: &str) -> bool {
    text.starts_with('-') && text.len() > 1
}

/// The part of a flag token looked up in the tables, and whether it carries its value.
///
/// Long flags are split at `=`; short flags are the dash plus one character,
/// with anything after that being an attached value (`-oout.txt`).
fn flag_name(text: &str) -> (&str, bool) {
    if text.starts_with("--") {
        return match text.split_once('=') {
            Some((name, _)) => (name, true),
            None => (text, false),
        };
    }
    let end = text.char_indices().nth(2).map_or(text.len(), |(i, _)| i);
    (&text[..end], end < text.len())
}

/// Whether `tokens` still holds a positional once known flag values are skipped
fn has_positional(tokens: &[OsString]) -> bool {
    let mut tokens = tokens.iter();
    while let Some(token) = tokens.next() {
        let text = token.to_string_lossy();
        if text == "--" {
            return tokens.next().is_some();
        }
        if !is_flag(&text) {
            return true;
        }
        let (name, inline_value) = flag_name(&text);
        if VALUE_FLAGS.contains(&name) && !inline_value {
            tokens.next();
        }
    }
    false
}
