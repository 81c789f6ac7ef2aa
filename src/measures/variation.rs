//! Variation calculus.
//!
//! The variation of a measure is its change since the start of the leak
//! period. The baseline `V_old - D_old` is kept constant when a new value
//! arrives, which gives `D_new = V_new - (V_old - D_old)`. Ratings use their
//! ordinal as the value.

/// Variation of a measure after its value moved from `previous_value` to `new_value`.
///
/// When the previous value or the previous variation is unknown there is no
/// baseline, and the previous variation is kept as it was. When the value
/// does not change, the previous variation is returned untouched.
#[must_use]
pub fn refreshed_variation(previous_value: Option<f64>, previous_variation: Option<f64>, new_value: f64) -> Option<f64> {
    let (Some(old_value), Some(old_variation)) = (previous_value, previous_variation) else {
        return previous_variation;
    };

    if old_value.total_cmp(&new_value).is_eq() {
        return Some(old_variation);
    }

    Some(new_value - (old_value - old_variation))
}
