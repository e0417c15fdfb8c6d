//! Unit constants and human-readable formatting

use crate::{OutcomeError, Result};
use chrono::DateTime;

/// yoctoNEAR in one NEAR
pub const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

/// Gas units in one TGas
pub const GAS_PER_TGAS: u64 = 1_000_000_000_000;

/// Gas attached to the agent's contract calls
pub const GAS_300_TGAS: u64 = 300 * GAS_PER_TGAS;

/// Block timestamps are nanoseconds since the Unix epoch
pub const NANOSECONDS_PER_SECOND: u64 = 1_000_000_000;

const YOCTO_DIGITS: usize = 24;

/// Render a yoctoNEAR amount in NEAR, truncated to `decimals` places
pub fn format_yocto_near(yocto: u128, decimals: usize) -> String {
    let whole = yocto / YOCTO_PER_NEAR;
    if decimals == 0 {
        return whole.to_string();
    }

    let mut fraction = format!("{:0width$}", yocto % YOCTO_PER_NEAR, width = YOCTO_DIGITS);
    if decimals <= YOCTO_DIGITS {
        fraction.truncate(decimals);
    } else {
        fraction.extend(std::iter::repeat('0').take(decimals - YOCTO_DIGITS));
    }
    format!("{}.{}", whole, fraction)
}

/// Render gas in TGas with four (truncated) decimals
pub fn format_tgas(gas: u64) -> String {
    let whole = gas / GAS_PER_TGAS;
    let fraction = (gas % GAS_PER_TGAS) / (GAS_PER_TGAS / 10_000);
    format!("{}.{:04} TGas", whole, fraction)
}

/// Render a block timestamp as `YYYY-MM-DD HH:MM UTC`
pub fn format_near_timestamp(nanos: u64) -> Result<String> {
    let secs = (nanos / NANOSECONDS_PER_SECOND) as i64;
    let subsec = (nanos % NANOSECONDS_PER_SECOND) as u32;
    let dt = DateTime::from_timestamp(secs, subsec)
        .ok_or(OutcomeError::InvalidTimestamp { nanos })?;
    Ok(dt.format("%Y-%m-%d %H:%M UTC").to_string())
}
