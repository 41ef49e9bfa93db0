use crate::lowess::CurvePoint;
use lexirank_core::Rank;

/// Highest rank whose fitted score is at or above `threshold`.
///
/// The curve is scanned from its highest rank downward. `None` means no
/// point reaches the threshold: too little data past the drop, or a very
/// small vocabulary.
pub fn find_falloff(curve: &[CurvePoint], threshold: f64) -> Option<Rank> {
    curve
        .iter()
        .rev()
        .find(|point| point.score >= threshold)
        .map(|point| point.rank)
}
