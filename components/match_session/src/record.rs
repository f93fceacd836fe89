/// Title used when the oracle reports a hit without one
pub const PLACEHOLDER_TITLE: &str = "Unknown Title";

const KEY_SEPARATOR: char = '\u{1f}';

/// A single hit as the oracle reports it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OracleMatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

impl OracleMatch {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            subtitle: Some(subtitle.into()),
        }
    }
}

/// An identified recording
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchRecord {
    title: String,
    label: String,
}

impl MatchRecord {
    pub fn new(title: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `Title`, or `Title - Label` when a label is present
    pub fn display_line(&self) -> String {
        if self.label.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.label)
        }
    }

    pub(crate) fn dedup_key(&self) -> String {
        format!("{}{}{}", self.title, KEY_SEPARATOR, self.label)
    }
}

impl From<OracleMatch> for MatchRecord {
    fn from(hit: OracleMatch) -> Self {
        let title = hit
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());
        Self {
            title,
            label: hit.subtitle.unwrap_or_default(),
        }
    }
}
