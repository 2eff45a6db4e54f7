use thiserror::Error;

use crate::DeterministicRng;

/// Largest probability `roll_dice` accepts.
///
/// Some shipped weapon and research data carries chances above 1.0. Those are
/// almost certainly data mistakes, so they are logged rather than rejected.
pub const MAX_TOLERATED_PROBABILITY: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DiceError {
    #[error("probability {0} outside 0.0..={MAX_TOLERATED_PROBABILITY}")]
    ProbabilityOutOfRange(f32),
}

/// Check a probability against the accepted range without rolling.
pub fn check_probability(probability: f32) -> Result<(), DiceError> {
    if (0.0..=MAX_TOLERATED_PROBABILITY).contains(&probability) {
        Ok(())
    } else {
        Err(DiceError::ProbabilityOutOfRange(probability))
    }
}

/// Roll a percentile die and succeed with the given probability.
pub fn roll_dice<R>(rng: &mut R, probability: f32) -> Result<bool, DiceError>
where
    R: DeterministicRng + ?Sized,
{
    check_probability(probability)?;
    if probability > 1.0 {
        tracing::warn!(probability, "suspect probability above 1.0, treating as certain");
    }

    let threshold = (probability * 100.0).round() as i32;
    let roll = rng.next_in_range(0, 100);
    Ok(roll < threshold)
}
