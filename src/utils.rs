use crate::config::{MAX_TIMER_SECONDS, MIN_TIMER_SECONDS};

/// Clamp whatever the seconds input holds into `[0, 3600]`.
///
/// Negative values are flipped to their absolute value, fractions are
/// truncated and anything that is not a number (including an empty field)
/// counts as zero. Never fails: the input is corrected, not rejected.
pub fn normalize_seconds_input(input: &str) -> u32 {
    let value = input.trim().parse::<f64>().unwrap_or(0.0);
    if value.is_nan() {
        return MIN_TIMER_SECONDS;
    }
    value.abs().min(MAX_TIMER_SECONDS as f64).trunc() as u32
}

/// Read the `timer` attribute as a number of seconds.
///
/// Hosts are expected to pass a plain integer; anything else gets the same
/// treatment as a hand-typed value.
pub fn parse_timer_attribute(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(seconds) => seconds.min(MAX_TIMER_SECONDS),
        Err(_) => normalize_seconds_input(value),
    }
}
