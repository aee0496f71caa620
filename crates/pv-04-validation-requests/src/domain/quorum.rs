//! Quorum arithmetic

/// Fewer active validators than this and no request can be opened.
pub const MIN_ACTIVE_VALIDATORS: usize = 3;

/// Quorum percentage for ordinary payments.
pub const STANDARD_QUORUM_PERCENT: u8 = 67;

/// Quorum percentage for payments at or above the high-value threshold.
pub const HIGH_VALUE_QUORUM_PERCENT: u8 = 75;

/// `ceil(active_count * percent / 100)` in integer arithmetic.
pub fn required_signatures(active_count: usize, percent: u8) -> u32 {
    let scaled = (active_count as u128) * u128::from(percent);
    u32::try_from(scaled.div_ceil(100)).unwrap_or(u32::MAX)
}

/// Quorum percentage for a payment amount.
pub fn quorum_percent(is_high_value: bool, standard: u8, high_value: u8) -> u8 {
    if is_high_value {
        high_value
    } else {
        standard
    }
}
