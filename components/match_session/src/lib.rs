mod dedup;
mod error;
mod oracle;
mod record;
mod session;
mod sweep;

#[cfg(test)]
mod stub;

pub use dedup::ResultSet;
pub use error::SessionError;
pub use oracle::{MatchNotifier, MatchOracle, OracleEvent};
pub use record::{MatchRecord, OracleMatch, PLACEHOLDER_TITLE};
pub use session::{MatchSession, DEFAULT_TIMEOUT};
pub use sweep::{SweepPhase, SweepReport, SweepSettings};
