//! Weighted vote accumulation across metric runs.

use serde::{Deserialize, Serialize};

use vidprint_models::ColorModel;

/// Accumulated votes for one corpus video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCount {
    pub video: String,
    pub votes: u32,
}

/// Vote tally of a match session.
///
/// Each metric run records its winner, weighted by the run's color model.
/// Entries keep first-recorded order, which breaks ties in the verdict.
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    counts: Vec<VoteCount>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one metric run's winner with the model's vote weight.
    pub fn record(&mut self, model: ColorModel, video: &str) {
        let weight = model.vote_weight();
        if let Some(entry) = self.counts.iter_mut().find(|c| c.video == video) {
            entry.votes += weight;
        } else {
            self.counts.push(VoteCount {
                video: video.to_string(),
                votes: weight,
            });
        }
    }

    pub fn counts(&self) -> &[VoteCount] {
        &self.counts
    }

    pub fn total_votes(&self) -> u32 {
        self.counts.iter().map(|c| c.votes).sum()
    }

    /// The most-voted video; a tie keeps the first-recorded entry.
    pub fn verdict(&self) -> Option<&VoteCount> {
        let mut best: Option<&VoteCount> = None;
        for count in &self.counts {
            match best {
                None => best = Some(count),
                Some(incumbent) if count.votes > incumbent.votes => best = Some(count),
                Some(_) => {}
            }
        }
        best
    }

    pub fn into_counts(self) -> Vec<VoteCount> {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_weights() {
        let mut tally = VoteTally::new();
        tally.record(ColorModel::Gray, "a.mp4");
        tally.record(ColorModel::Rgb, "a.mp4");
        tally.record(ColorModel::Hsv, "b.mp4");

        assert_eq!(tally.counts().len(), 2);
        assert_eq!(tally.counts()[0].votes, 6);
        assert_eq!(tally.counts()[1].votes, 8);
        assert_eq!(tally.total_votes(), 14);
        assert_eq!(tally.verdict().map(|c| c.video.as_str()), Some("b.mp4"));
    }

    #[test]
    fn test_verdict_tie_keeps_first_recorded() {
        let mut tally = VoteTally::new();
        tally.record(ColorModel::Rgb, "first.mp4");
        tally.record(ColorModel::Rgb, "second.mp4");

        assert_eq!(tally.verdict().map(|c| c.video.as_str()), Some("first.mp4"));
    }

    #[test]
    fn test_empty_tally_has_no_verdict() {
        assert!(VoteTally::new().verdict().is_none());
        assert_eq!(VoteTally::new().total_votes(), 0);
    }
}
