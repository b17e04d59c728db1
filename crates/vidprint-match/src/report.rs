//! Match session reporting types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use vidprint_models::{ColorModel, Metric, ModelSelection};

use crate::session::VoteCount;

/// One corpus video's score under one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub video: String,
    pub score: f64,
}

/// Winner of one (model, metric) run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: String,
    pub score: f64,
}

/// One metric run: the full score table plus its winner and result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricRun {
    pub model: ColorModel,
    pub metric: Metric,
    pub rows: Vec<ScoreRow>,
    pub outcome: MatchOutcome,
    pub table: PathBuf,
}

/// Summary of a whole match session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub session_id: Uuid,
    pub query: String,
    pub selection: ModelSelection,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub runs: Vec<MetricRun>,
    pub tally: Vec<VoteCount>,
    /// Most-voted corpus video, ties broken by first recorded.
    pub verdict: Option<String>,
}

impl MatchReport {
    pub fn total_votes(&self) -> u32 {
        self.tally.iter().map(|c| c.votes).sum()
    }
}
