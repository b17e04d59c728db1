//! Fingerprint comparison metrics.
//!
//! Six one-dimensional metrics score gray and rgb fingerprints bin by bin.
//! Two statistical distances score joint HSV fingerprints by decomposing the
//! grid into its value-axis slices, one per (hue, saturation) pair, and
//! summing a sample-based 1-D distance over all slices.
//!
//! Each metric has a fixed polarity: correlation and intersection grow with
//! similarity, the remaining metrics shrink. Callers reduce score tables to
//! a winner through [`Polarity::improves`] instead of branching per metric.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use ndarray::Array3;

use crate::color::ColorModel;
use crate::fingerprint::Fingerprint;

/// Errors from scoring a fingerprint pair.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("metric {metric} does not apply to {model} fingerprints")]
    Inapplicable { metric: Metric, model: ColorModel },

    #[error("cannot compare {query} fingerprint against {candidate} fingerprint")]
    ModelMismatch {
        query: ColorModel,
        candidate: ColorModel,
    },

    #[error("fingerprint shapes differ: {0}")]
    ShapeMismatch(String),
}

/// Whether better scores are larger or smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    /// True when `candidate` is a strict improvement over `incumbent`.
    /// Equal scores never improve, so the first of a tie stands.
    pub fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Polarity::HigherIsBetter => candidate > incumbent,
            Polarity::LowerIsBetter => candidate < incumbent,
        }
    }
}

/// A fingerprint comparison metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Pearson correlation of bin values.
    Correlation,
    /// Chi-square distance, first operand in the denominator.
    ChiSquare,
    /// Sum of bin-wise minima.
    Intersection,
    /// Bhattacharyya distance.
    Bhattacharyya,
    /// Symmetric chi-square variant with the bin sum in the denominator.
    ChiSquareAlt,
    /// Kullback-Leibler divergence from the second operand to the first.
    KlDivergence,
    /// Summed 1-D Wasserstein distance over HSV value-axis slices.
    Wasserstein,
    /// Summed 1-D energy distance over HSV value-axis slices.
    EnergyDistance,
}

impl Metric {
    /// Metrics scoring one-dimensional fingerprints, in run order.
    pub const ONE_DIMENSIONAL: [Metric; 6] = [
        Metric::Correlation,
        Metric::ChiSquare,
        Metric::Intersection,
        Metric::Bhattacharyya,
        Metric::ChiSquareAlt,
        Metric::KlDivergence,
    ];

    /// Metrics scoring joint HSV fingerprints, in run order.
    pub const DISTRIBUTIONAL: [Metric; 2] = [Metric::Wasserstein, Metric::EnergyDistance];

    /// Metrics applicable to fingerprints of the given model.
    pub fn for_model(model: ColorModel) -> &'static [Metric] {
        match model {
            ColorModel::Gray | ColorModel::Rgb => &Self::ONE_DIMENSIONAL,
            ColorModel::Hsv => &Self::DISTRIBUTIONAL,
        }
    }

    pub fn applies_to(&self, model: ColorModel) -> bool {
        Self::for_model(model).contains(self)
    }

    /// Slug used in result file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Metric::Correlation => "correlation",
            Metric::ChiSquare => "chi-square",
            Metric::Intersection => "intersection",
            Metric::Bhattacharyya => "bhattacharyya",
            Metric::ChiSquareAlt => "alt-chi-square",
            Metric::KlDivergence => "kl-divergence",
            Metric::Wasserstein => "wasserstein",
            Metric::EnergyDistance => "energy-distance",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Correlation => "Correlation",
            Metric::ChiSquare => "Chi-Square",
            Metric::Intersection => "Intersection",
            Metric::Bhattacharyya => "Bhattacharyya",
            Metric::ChiSquareAlt => "Alternative Chi-Square",
            Metric::KlDivergence => "Kullback-Leibler divergence",
            Metric::Wasserstein => "Wasserstein",
            Metric::EnergyDistance => "Energy distance",
        }
    }

    pub fn polarity(&self) -> Polarity {
        match self {
            Metric::Correlation | Metric::Intersection => Polarity::HigherIsBetter,
            Metric::ChiSquare
            | Metric::Bhattacharyya
            | Metric::ChiSquareAlt
            | Metric::KlDivergence
            | Metric::Wasserstein
            | Metric::EnergyDistance => Polarity::LowerIsBetter,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Score a fingerprint pair under one metric.
///
/// Both fingerprints must share the metric's color model and shape. The rgb
/// score is the unweighted mean of the three per-channel scores.
pub fn score_fingerprints(
    metric: Metric,
    query: &Fingerprint,
    candidate: &Fingerprint,
) -> Result<f64, MetricError> {
    let model = query.model();
    if model != candidate.model() {
        return Err(MetricError::ModelMismatch {
            query: model,
            candidate: candidate.model(),
        });
    }
    if !metric.applies_to(model) {
        return Err(MetricError::Inapplicable { metric, model });
    }

    match (query, candidate) {
        (Fingerprint::Gray(a), Fingerprint::Gray(b)) => score_bins(metric, model, a, b),
        (Fingerprint::Rgb(a), Fingerprint::Rgb(b)) => {
            let blue = score_bins(metric, model, &a.blue, &b.blue)?;
            let green = score_bins(metric, model, &a.green, &b.green)?;
            let red = score_bins(metric, model, &a.red, &b.red)?;
            Ok((blue + green + red) / 3.0)
        }
        (Fingerprint::Hsv(a), Fingerprint::Hsv(b)) => {
            if a.dim() != b.dim() {
                return Err(MetricError::ShapeMismatch(format!(
                    "{:?} vs {:?}",
                    a.dim(),
                    b.dim()
                )));
            }
            match metric {
                Metric::Wasserstein => Ok(grid_slice_distance(a, b, 1)),
                Metric::EnergyDistance => Ok(grid_slice_distance(a, b, 2)),
                other => Err(MetricError::Inapplicable {
                    metric: other,
                    model,
                }),
            }
        }
        _ => Err(MetricError::ModelMismatch {
            query: model,
            candidate: candidate.model(),
        }),
    }
}

fn score_bins(metric: Metric, model: ColorModel, a: &[f64], b: &[f64]) -> Result<f64, MetricError> {
    if a.len() != b.len() {
        return Err(MetricError::ShapeMismatch(format!(
            "{} vs {} bins",
            a.len(),
            b.len()
        )));
    }
    match metric {
        Metric::Correlation => Ok(correlation(a, b)),
        Metric::ChiSquare => Ok(chi_square(a, b)),
        Metric::Intersection => Ok(intersection(a, b)),
        Metric::Bhattacharyya => Ok(bhattacharyya(a, b)),
        Metric::ChiSquareAlt => Ok(chi_square_alt(a, b)),
        Metric::KlDivergence => Ok(kl_divergence(a, b)),
        other => Err(MetricError::Inapplicable {
            metric: other,
            model,
        }),
    }
}

/// Pearson correlation of bin values.
///
/// Returns 1.0 when either histogram has no variance, so two flat
/// histograms count as perfectly correlated.
pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    if n == 0.0 {
        return 1.0;
    }
    let mean_a: f64 = a.iter().sum::<f64>() / n;
    let mean_b: f64 = b.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        num += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom.abs() > f64::EPSILON {
        num / denom
    } else {
        1.0
    }
}

/// Chi-square distance with the first operand in the denominator.
///
/// Formula: sum((a[i] - b[i])^2 / a[i]) over bins where a[i] is nonzero.
pub fn chi_square(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        if x.abs() > f64::EPSILON {
            let diff = x - y;
            sum += diff * diff / x;
        }
    }
    sum
}

/// Histogram intersection: sum of bin-wise minima.
pub fn intersection(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(&x, &y)| x.min(y)).sum()
}

/// Bhattacharyya distance.
///
/// Formula: sqrt(max(0, 1 - sum(sqrt(a[i] * b[i])) / sqrt(sum(a) * sum(b)))).
pub fn bhattacharyya(a: &[f64], b: &[f64]) -> f64 {
    let sum_a: f64 = a.iter().sum();
    let sum_b: f64 = b.iter().sum();
    let overlap: f64 = a.iter().zip(b.iter()).map(|(&x, &y)| (x * y).sqrt()).sum();

    let denom = sum_a * sum_b;
    let scale = if denom.abs() > f64::EPSILON {
        1.0 / denom.sqrt()
    } else {
        1.0
    };
    (1.0 - overlap * scale).max(0.0).sqrt()
}

/// Symmetric chi-square variant.
///
/// Formula: 2 * sum((a[i] - b[i])^2 / (a[i] + b[i])) over bins with nonzero
/// sum.
pub fn chi_square_alt(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let total = x + y;
        if total.abs() > f64::EPSILON {
            let diff = x - y;
            sum += diff * diff / total;
        }
    }
    sum * 2.0
}

/// Kullback-Leibler divergence of `b` from `a`.
///
/// Zero bins of `a` contribute nothing; zero bins of `b` are clamped to
/// 1e-10 to keep the divergence finite.
pub fn kl_divergence(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    for (&p, &q) in a.iter().zip(b.iter()) {
        if p.abs() <= f64::EPSILON {
            continue;
        }
        let q = if q.abs() <= f64::EPSILON { 1e-10 } else { q };
        sum += p * (p / q).ln();
    }
    sum
}

/// 1-D Wasserstein distance between two sets of unweighted sample positions.
pub fn wasserstein_1d(u: &[f64], v: &[f64]) -> f64 {
    cdf_distance(u, v, 1)
}

/// 1-D energy distance between two sets of unweighted sample positions.
pub fn energy_1d(u: &[f64], v: &[f64]) -> f64 {
    cdf_distance(u, v, 2)
}

/// Distance between the empirical CDFs of two sample sets.
///
/// `p = 1` integrates |U - V| over the merged support (Wasserstein);
/// `p = 2` yields sqrt(2) * L2(U - V) (energy distance).
fn cdf_distance(u: &[f64], v: &[f64], p: u32) -> f64 {
    if u.is_empty() || v.is_empty() {
        return 0.0;
    }

    let mut us = u.to_vec();
    let mut vs = v.to_vec();
    us.sort_by(|a, b| a.total_cmp(b));
    vs.sort_by(|a, b| a.total_cmp(b));

    let mut all = Vec::with_capacity(us.len() + vs.len());
    all.extend_from_slice(&us);
    all.extend_from_slice(&vs);
    all.sort_by(|a, b| a.total_cmp(b));

    let mut acc = 0.0;
    for pair in all.windows(2) {
        let delta = pair[1] - pair[0];
        if delta <= 0.0 {
            continue;
        }
        let u_cdf = us.partition_point(|&x| x <= pair[0]) as f64 / us.len() as f64;
        let v_cdf = vs.partition_point(|&x| x <= pair[0]) as f64 / vs.len() as f64;
        let diff = u_cdf - v_cdf;
        acc += match p {
            1 => diff.abs() * delta,
            _ => diff * diff * delta,
        };
    }

    match p {
        1 => acc,
        _ => (2.0 * acc).sqrt(),
    }
}

/// Sum a slice distance over every (hue, saturation) pair of two HSV grids.
///
/// Each slice's bin values along the value axis are treated as sample
/// positions of an empirical distribution.
fn grid_slice_distance(a: &Array3<f64>, b: &Array3<f64>, p: u32) -> f64 {
    let (hue_bins, sat_bins, val_bins) = a.dim();
    let mut total = 0.0;
    let mut u = vec![0.0; val_bins];
    let mut v = vec![0.0; val_bins];
    for h in 0..hue_bins {
        for s in 0..sat_bins {
            for val in 0..val_bins {
                u[val] = a[[h, s, val]];
                v[val] = b[[h, s, val]];
            }
            total += cdf_distance(&u, &v, p);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{ChannelFingerprints, FINGERPRINT_BINS};
    use crate::histogram::{HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS};

    fn front_loaded(values: &[f64]) -> Vec<f64> {
        let mut bins = vec![0.0; FINGERPRINT_BINS];
        bins[..values.len()].copy_from_slice(values);
        bins
    }

    #[test]
    fn test_identical_histograms() {
        let a = front_loaded(&[0.5, 0.3, 0.2]);
        assert!((correlation(&a, &a) - 1.0).abs() < 1e-9);
        assert!(chi_square(&a, &a).abs() < 1e-12);
        assert!((intersection(&a, &a) - 1.0).abs() < 1e-12);
        assert!(bhattacharyya(&a, &a).abs() < 1e-6);
        assert!(chi_square_alt(&a, &a).abs() < 1e-12);
        assert!(kl_divergence(&a, &a).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_flat_histograms() {
        let a = vec![0.25; 4];
        let b = vec![0.1; 4];
        // No variance on either side counts as perfect correlation
        assert!((correlation(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_metric_ordering_tracks_similarity() {
        let query = front_loaded(&[0.8, 0.2]);
        let similar = front_loaded(&[0.7, 0.3]);
        let mut different = vec![0.0; FINGERPRINT_BINS];
        different[200] = 0.6;
        different[201] = 0.4;

        assert!(correlation(&query, &similar) > correlation(&query, &different));
        assert!(chi_square(&query, &similar) < chi_square(&query, &different));
        assert!(intersection(&query, &similar) > intersection(&query, &different));
        assert!(bhattacharyya(&query, &similar) < bhattacharyya(&query, &different));
        assert!(chi_square_alt(&query, &similar) < chi_square_alt(&query, &different));
        assert!(kl_divergence(&query, &similar) < kl_divergence(&query, &different));
    }

    #[test]
    fn test_polarity_table() {
        assert_eq!(Metric::Correlation.polarity(), Polarity::HigherIsBetter);
        assert_eq!(Metric::Intersection.polarity(), Polarity::HigherIsBetter);
        assert_eq!(Metric::ChiSquare.polarity(), Polarity::LowerIsBetter);
        assert_eq!(Metric::Bhattacharyya.polarity(), Polarity::LowerIsBetter);
        assert_eq!(Metric::ChiSquareAlt.polarity(), Polarity::LowerIsBetter);
        assert_eq!(Metric::KlDivergence.polarity(), Polarity::LowerIsBetter);
        assert_eq!(Metric::Wasserstein.polarity(), Polarity::LowerIsBetter);
        assert_eq!(Metric::EnergyDistance.polarity(), Polarity::LowerIsBetter);
    }

    #[test]
    fn test_polarity_improvement_is_strict() {
        assert!(Polarity::HigherIsBetter.improves(0.9, 0.5));
        assert!(!Polarity::HigherIsBetter.improves(0.5, 0.5));
        assert!(Polarity::LowerIsBetter.improves(0.1, 0.5));
        assert!(!Polarity::LowerIsBetter.improves(0.5, 0.5));
    }

    #[test]
    fn test_kl_divergence_clamps_zero_bins() {
        let p = vec![0.5, 0.5];
        let q = vec![1.0, 0.0];
        let d = kl_divergence(&p, &q);
        assert!(d.is_finite());
        // Half the mass against 1e-10 dominates the sum
        assert!(d > 5.0);
    }

    #[test]
    fn test_metrics_for_model() {
        assert_eq!(Metric::for_model(ColorModel::Gray).len(), 6);
        assert_eq!(Metric::for_model(ColorModel::Rgb).len(), 6);
        assert_eq!(
            Metric::for_model(ColorModel::Hsv),
            &[Metric::Wasserstein, Metric::EnergyDistance]
        );
        assert!(Metric::Correlation.applies_to(ColorModel::Rgb));
        assert!(!Metric::Correlation.applies_to(ColorModel::Hsv));
        assert!(!Metric::Wasserstein.applies_to(ColorModel::Gray));
    }

    #[test]
    fn test_metric_names_in_reports_and_files() {
        let json = serde_json::to_string(&Metric::ChiSquareAlt).unwrap();
        assert_eq!(json, "\"chi-square-alt\"");
        assert_eq!(Metric::ChiSquareAlt.slug(), "alt-chi-square");

        let json = serde_json::to_string(&Metric::KlDivergence).unwrap();
        assert_eq!(json, "\"kl-divergence\"");
        assert_eq!(Metric::KlDivergence.slug(), "kl-divergence");

        let back: Metric = serde_json::from_str("\"bhattacharyya\"").unwrap();
        assert_eq!(back, Metric::Bhattacharyya);
    }

    #[test]
    fn test_wasserstein_known_value() {
        let u = [0.0, 0.0, 1.0];
        let v = [0.0, 1.0, 1.0];
        assert!((wasserstein_1d(&u, &v) - 1.0 / 3.0).abs() < 1e-12);
        assert!((energy_1d(&u, &v) - 2.0_f64.sqrt() / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_distances_identical_and_symmetric() {
        let u = [0.1, 0.4, 0.5];
        let v = [0.2, 0.2, 0.6];
        assert!(wasserstein_1d(&u, &u).abs() < 1e-12);
        assert!(energy_1d(&u, &u).abs() < 1e-12);
        assert!((wasserstein_1d(&u, &v) - wasserstein_1d(&v, &u)).abs() < 1e-12);
        assert!((energy_1d(&u, &v) - energy_1d(&v, &u)).abs() < 1e-12);
        assert!(wasserstein_1d(&u, &v) >= 0.0);
        assert!(energy_1d(&u, &v) >= 0.0);
    }

    #[test]
    fn test_grid_distance_localizes_to_changed_slice() {
        let dims = (HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS);
        let a = Array3::<f64>::zeros(dims);
        let mut b = Array3::<f64>::zeros(dims);
        b[[2, 3, 0]] = 0.0;
        b[[2, 3, 1]] = 0.0;
        b[[2, 3, 2]] = 1.0;

        let expected = wasserstein_1d(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0]);
        assert!((grid_slice_distance(&a, &b, 1) - expected).abs() < 1e-12);
        assert!(grid_slice_distance(&a, &a, 1).abs() < 1e-12);
        assert!(grid_slice_distance(&a, &a, 2).abs() < 1e-12);
    }

    #[test]
    fn test_score_rgb_is_channel_mean() {
        let identical = front_loaded(&[0.5, 0.5]);
        let mut disjoint = vec![0.0; FINGERPRINT_BINS];
        disjoint[100] = 1.0;

        let query = Fingerprint::Rgb(ChannelFingerprints {
            blue: identical.clone(),
            green: identical.clone(),
            red: identical.clone(),
        });
        let candidate = Fingerprint::Rgb(ChannelFingerprints {
            blue: identical.clone(),
            green: identical.clone(),
            red: disjoint,
        });

        let score = score_fingerprints(Metric::Intersection, &query, &candidate).unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_rejects_mismatches() {
        let gray = Fingerprint::Gray(front_loaded(&[1.0]));
        let hsv = Fingerprint::Hsv(Array3::zeros((HSV_HUE_BINS, HSV_SAT_BINS, HSV_VAL_BINS)));

        assert!(matches!(
            score_fingerprints(Metric::Correlation, &gray, &hsv),
            Err(MetricError::ModelMismatch { .. })
        ));
        assert!(matches!(
            score_fingerprints(Metric::Wasserstein, &gray, &gray),
            Err(MetricError::Inapplicable { .. })
        ));
        assert!(matches!(
            score_fingerprints(Metric::Correlation, &hsv, &hsv),
            Err(MetricError::Inapplicable { .. })
        ));
    }
}
