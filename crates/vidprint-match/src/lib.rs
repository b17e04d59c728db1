//! Fingerprint comparison engine for vidprint.
//!
//! Scores a query video's stored fingerprints against a corpus, one pass
//! per color model, and reduces the metric runs to a weighted verdict.

pub mod best;
pub mod engine;
pub mod error;
pub mod report;
pub mod session;

pub use best::best_index;
pub use engine::MatchEngine;
pub use error::{MatchError, MatchResult};
pub use report::{MatchOutcome, MatchReport, MetricRun, ScoreRow};
pub use session::{VoteCount, VoteTally};
