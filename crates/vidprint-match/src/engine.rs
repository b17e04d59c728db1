//! Comparison engine.
//!
//! A session runs one pass per selected color model: load the query
//! fingerprint, load every corpus fingerprint in listing order, score the
//! corpus under each applicable metric, persist the score table and record a
//! weighted vote for each run's winner. Passes are sequential and share one
//! vote tally.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use vidprint_models::{score_fingerprints, Fingerprint, Metric, ModelSelection};
use vidprint_store::{FingerprintStore, ResultsWriter};

use crate::best::best_index;
use crate::error::{MatchError, MatchResult};
use crate::report::{MatchOutcome, MatchReport, MetricRun, ScoreRow};
use crate::session::VoteTally;

/// Runs match sessions against stored fingerprints.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    store: FingerprintStore,
    results: ResultsWriter,
}

impl MatchEngine {
    pub fn new(store: FingerprintStore, results: ResultsWriter) -> Self {
        Self { store, results }
    }

    pub fn store(&self) -> &FingerprintStore {
        &self.store
    }

    /// Run a full match session of the query against the corpus.
    ///
    /// The corpus slice fixes the row order of every score table and the
    /// tie-breaking order of every winner reduction. Any missing or
    /// malformed fingerprint aborts the session.
    pub async fn run(
        &self,
        selection: ModelSelection,
        query: &str,
        corpus: &[String],
    ) -> MatchResult<MatchReport> {
        if corpus.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let session_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(
            session = %session_id,
            query,
            selection = %selection,
            corpus = corpus.len(),
            "starting match session"
        );

        let mut tally = VoteTally::new();
        let mut runs = Vec::new();

        for &model in selection.models() {
            let query_fp = self.store.load_fingerprint(query, model).await?;

            let mut candidates: Vec<(&str, Fingerprint)> = Vec::with_capacity(corpus.len());
            for video in corpus {
                let fp = self.store.load_fingerprint(video, model).await?;
                candidates.push((video.as_str(), fp));
            }
            debug!(model = %model, candidates = candidates.len(), "corpus fingerprints loaded");

            for &metric in Metric::for_model(model) {
                let mut rows = Vec::with_capacity(candidates.len());
                for (video, fp) in &candidates {
                    let score = score_fingerprints(metric, &query_fp, fp)?;
                    rows.push(ScoreRow {
                        video: video.to_string(),
                        score,
                    });
                }

                let winner = best_index(rows.iter().map(|r| r.score), metric.polarity())
                    .ok_or(MatchError::EmptyCorpus)?;
                let outcome = MatchOutcome {
                    winner: rows[winner].video.clone(),
                    score: rows[winner].score,
                };

                let table_rows: Vec<(&str, f64)> =
                    rows.iter().map(|r| (r.video.as_str(), r.score)).collect();
                let table = self
                    .results
                    .write_scores(selection, model, metric, &table_rows)
                    .await?;

                info!(
                    model = %model,
                    metric = %metric,
                    winner = %outcome.winner,
                    score = outcome.score,
                    "metric run complete"
                );
                tally.record(model, &outcome.winner);
                runs.push(MetricRun {
                    model,
                    metric,
                    rows,
                    outcome,
                    table,
                });
            }
        }

        let verdict = tally.verdict().map(|count| count.video.clone());
        let report = MatchReport {
            session_id,
            query: query.to_string(),
            selection,
            started_at,
            finished_at: Utc::now(),
            runs,
            tally: tally.into_counts(),
            verdict,
        };
        info!(
            session = %report.session_id,
            runs = report.runs.len(),
            verdict = report.verdict.as_deref().unwrap_or("none"),
            "match session complete"
        );
        Ok(report)
    }
}
