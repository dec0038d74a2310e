//! Probability helpers shared by the agents

use rand::{Rng, distr::StandardUniform};

/// Normalize weights to probabilities that sum to 1.0.
///
/// # Returns
///
/// - `Some(Vec<f64>)` containing normalized probabilities if the total is
///   positive and finite
/// - `None` otherwise
///
/// # Examples
///
/// ```
/// use ttt_learner::utils::normalize_weights;
///
/// let normalized = normalize_weights(vec![1.0, 2.0, 1.0]).unwrap();
/// assert_eq!(normalized, vec![0.25, 0.5, 0.25]);
///
/// assert_eq!(normalize_weights(vec![0.0, 0.0]), None);
/// ```
pub fn normalize_weights<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    Some(weights.into_iter().map(|w| w / total).collect())
}

/// Roulette selection over a probability vector with a given draw.
///
/// Accumulates `probabilities` in order and returns the first index where
/// the running sum exceeds `draw`. If rounding leaves the sum at or below
/// the draw, the last index is returned. Returns `None` only for an empty
/// slice.
///
/// # Examples
///
/// ```
/// use ttt_learner::utils::roulette_index;
///
/// let probabilities = [0.25, 0.5, 0.25];
/// assert_eq!(roulette_index(&probabilities, 0.0), Some(0));
/// assert_eq!(roulette_index(&probabilities, 0.3), Some(1));
/// assert_eq!(roulette_index(&probabilities, 0.99), Some(2));
/// ```
pub fn roulette_index(probabilities: &[f64], draw: f64) -> Option<usize> {
    if probabilities.is_empty() {
        return None;
    }

    let mut cumulative = 0.0;
    for (index, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if draw < cumulative {
            return Some(index);
        }
    }

    Some(probabilities.len() - 1)
}

/// Draw once uniformly from [0, 1) and run [`roulette_index`].
pub fn roulette_sample<R: Rng>(rng: &mut R, probabilities: &[f64]) -> Option<usize> {
    let draw: f64 = rng.sample(StandardUniform);
    roulette_index(probabilities, draw)
}
