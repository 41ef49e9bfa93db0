use crate::config::CurveConfig;
use lexirank_core::Rank;
use lexirank_session::ScoreStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Residual scale below which the fit is treated as exact and robustifying stops.
const EXACT_FIT_SCALE: f64 = 1e-12;

/// One point of the fitted curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Rank of the observation.
    pub rank: Rank,
    /// Fitted score at that rank.
    pub score: f64,
}

/// Robust locally weighted linear regression (LOWESS).
///
/// Each point is refit from its `ceil(frac * n)` nearest neighbours with
/// tricube distance weights. Each robustifying iteration then down-weights
/// points with large residuals using bisquare weights on the residual
/// divided by six times the median absolute residual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSmoother {
    frac: f64,
    iterations: u32,
}

impl CurveSmoother {
    /// Smoother using `frac` of the points per local fit and `iterations` robust refits.
    pub fn new(frac: f64, iterations: u32) -> Self {
        Self { frac, iterations }
    }

    /// Smoother with the `[curve]` settings.
    pub fn from_config(config: &CurveConfig) -> Self {
        Self::new(config.frac, config.iterations)
    }

    /// Fit every recorded score. The result is ascending by rank.
    pub fn smooth_scores(&self, scores: &ScoreStore) -> Vec<CurvePoint> {
        let points: Vec<(Rank, f64)> = scores.iter().map(|r| (r.rank, r.score)).collect();
        self.smooth(&points)
    }

    /// Fit `(rank, score)` points. Unsorted input is sorted by rank first.
    ///
    /// No fit is attempted for an empty input, and a single point is
    /// returned unchanged.
    pub fn smooth(&self, points: &[(Rank, f64)]) -> Vec<CurvePoint> {
        let mut points = points.to_vec();
        points.sort_by_key(|(rank, _)| *rank);

        let n = points.len();
        if n < 2 {
            return points
                .into_iter()
                .map(|(rank, score)| CurvePoint { rank, score })
                .collect();
        }

        let xs: Vec<f64> = points.iter().map(|(r, _)| f64::from(*r)).collect();
        let ys: Vec<f64> = points.iter().map(|(_, s)| *s).collect();
        let k = ((self.frac * n as f64).ceil() as usize).clamp(2, n);

        let mut robustness = vec![1.0; n];
        let mut fitted = fit_pass(&xs, &ys, &robustness, k);
        for iteration in 0..self.iterations {
            let residuals: Vec<f64> = ys.iter().zip(&fitted).map(|(y, f)| y - f).collect();
            let scale = median_abs(&residuals);
            if scale < EXACT_FIT_SCALE {
                debug!(iteration, "Residuals vanished, stopping robustness iterations");
                break;
            }
            for (weight, residual) in robustness.iter_mut().zip(&residuals) {
                *weight = bisquare(residual / (6.0 * scale));
            }
            fitted = fit_pass(&xs, &ys, &robustness, k);
        }

        points
            .iter()
            .zip(fitted)
            .map(|((rank, _), score)| CurvePoint { rank: *rank, score })
            .collect()
    }
}

impl Default for CurveSmoother {
    fn default() -> Self {
        Self::from_config(&CurveConfig::default())
    }
}

/// Fit every point from its `k` nearest neighbours.
fn fit_pass(xs: &[f64], ys: &[f64], robustness: &[f64], k: usize) -> Vec<f64> {
    let n = xs.len();
    let mut left = 0;
    let mut right = k - 1;
    let mut fitted = Vec::with_capacity(n);

    for i in 0..n {
        let x = xs[i];
        // Slide the window while the next point on the right is closer than
        // the current leftmost one.
        while right + 1 < n && xs[right + 1] - x < x - xs[left] {
            left += 1;
            right += 1;
        }
        let h = (x - xs[left]).max(xs[right] - x);
        let fit = local_linear(xs, ys, robustness, left, right, x, h);
        fitted.push(fit.unwrap_or(ys[i]));
    }
    fitted
}

/// Weighted least-squares line through `left..=right`, evaluated at `x`.
fn local_linear(
    xs: &[f64],
    ys: &[f64],
    robustness: &[f64],
    left: usize,
    right: usize,
    x: f64,
    h: f64,
) -> Option<f64> {
    let weights: Vec<f64> = (left..=right)
        .map(|j| {
            let distance = if h > 0.0 { (xs[j] - x).abs() / h } else { 0.0 };
            tricube(distance) * robustness[j]
        })
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let (mut x_mean, mut y_mean) = (0.0, 0.0);
    for (j, w) in (left..=right).zip(&weights) {
        x_mean += w * xs[j];
        y_mean += w * ys[j];
    }
    x_mean /= total;
    y_mean /= total;

    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (j, w) in (left..=right).zip(&weights) {
        let dx = xs[j] - x_mean;
        sxx += w * dx * dx;
        sxy += w * dx * (ys[j] - y_mean);
    }
    if sxx <= f64::EPSILON * total * h.max(1.0).powi(2) {
        return Some(y_mean);
    }
    Some(y_mean + sxy / sxx * (x - x_mean))
}

fn tricube(u: f64) -> f64 {
    if u < 1.0 {
        (1.0 - u.powi(3)).powi(3)
    } else {
        0.0
    }
}

fn bisquare(u: f64) -> f64 {
    if u.abs() < 1.0 {
        (1.0 - u * u).powi(2)
    } else {
        0.0
    }
}

fn median_abs(values: &[f64]) -> f64 {
    let mut abs: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    abs.sort_by(f64::total_cmp);
    let mid = abs.len() / 2;
    if abs.len() % 2 == 0 {
        (abs[mid - 1] + abs[mid]) / 2.0
    } else {
        abs[mid]
    }
}
