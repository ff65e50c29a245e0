//! Gas escalation across direct deployment attempts.

/// Escalation step per attempt, in fifths (0.2).
const STEP_FIFTHS: u128 = 1;

/// Compute the gas limit and gas price for a direct attempt.
///
/// Both values are scaled by `1 + (attempt - 1) * 0.2` and truncated, so
/// attempt 1 uses the inputs unchanged, attempt 2 uses 1.2x and attempt 3
/// uses 1.4x. Attempt `0` is treated as attempt 1.
///
/// Integer arithmetic keeps the truncation exact: `1.2 * 200_000` is always
/// `240_000`, never `239_999`.
pub fn compute_gas(base_gas_hint: u64, network_gas_price: u128, attempt: u32) -> (u64, u128) {
    let gas_limit = scale(base_gas_hint as u128, attempt);
    let gas_price = scale(network_gas_price, attempt);

    (u64::try_from(gas_limit).unwrap_or(u64::MAX), gas_price)
}

fn scale(value: u128, attempt: u32) -> u128 {
    let numerator = 5 + STEP_FIFTHS * u128::from(attempt.saturating_sub(1));
    value.saturating_mul(numerator) / 5
}
