//! Generic best-of reduction over a score table.

use vidprint_models::Polarity;

/// Index of the best score under the given polarity.
///
/// Seeded by the first score and updated only on strict improvement, so an
/// exact tie keeps the earlier entry. Returns `None` for an empty table.
pub fn best_index<I>(scores: I, polarity: Polarity) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, score) in scores.into_iter().enumerate() {
        match best {
            None => best = Some((index, score)),
            Some((_, incumbent)) if polarity.improves(score, incumbent) => {
                best = Some((index, score));
            }
            Some(_) => {}
        }
    }
    best.map(|(index, _)| index)
}
