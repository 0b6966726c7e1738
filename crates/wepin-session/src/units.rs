/*
[INPUT]:  Hex quantities reported by the provider and user-entered amounts
[OUTPUT]: Decoded chain ids, ether-formatted balances, hex wei quantities
[POS]:    Conversion helpers - numeric wire format <-> display
[UPDATE]: When supporting other denominations
*/

use alloy_primitives::U256;

use crate::error::{Result, SessionError};

const ETHER_DECIMALS: usize = 18;
const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Decode the provider's hex chain id. Absent or empty decodes to `0`.
pub fn decode_chain_id(raw: Option<&str>) -> Result<u64> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(0);
    };
    let digits = strip_hex_prefix(raw);
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16)
        .map_err(|e| SessionError::Decode(format!("chain id '{raw}': {e}")))
}

/// Parse a hex wei quantity such as the `eth_getBalance` result.
pub fn parse_wei_hex(raw: &str) -> Result<U256> {
    let raw = raw.trim();
    let digits = strip_hex_prefix(raw);
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| SessionError::Decode(format!("wei amount '{raw}': {e}")))
}

/// Exact decimal rendering of a wei amount in ether.
///
/// Trailing fractional zeros are dropped, so one ether renders as `1`.
pub fn format_ether(wei: U256) -> String {
    let unit = U256::from(WEI_PER_ETHER);
    let whole = wei / unit;
    let fraction = wei % unit;
    if fraction.is_zero() {
        return whole.to_string();
    }

    let padded = format!("{:0>width$}", fraction.to_string(), width = ETHER_DECIMALS);
    format!("{whole}.{}", padded.trim_end_matches('0'))
}

/// Decode a hex wei quantity straight to its ether display string.
pub fn format_wei_hex(raw: &str) -> Result<String> {
    parse_wei_hex(raw).map(format_ether)
}

/// Convert a decimal ether amount entered by the user into wei.
pub fn parse_ether_amount(input: &str) -> Result<U256> {
    let input = input.trim();
    let invalid = |reason: &str| SessionError::InvalidAmount(format!("'{input}': {reason}"));

    if input.is_empty() {
        return Err(invalid("empty amount"));
    }

    let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid("expected a non-negative decimal number"));
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(invalid("more than 18 fractional digits"));
    }

    let whole_wei = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| invalid("amount too large"))?
    };
    let fraction_wei = if fraction.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{fraction:0<width$}", width = ETHER_DECIMALS);
        U256::from_str_radix(&padded, 10).map_err(|_| invalid("bad fraction"))?
    };

    whole_wei
        .checked_mul(U256::from(WEI_PER_ETHER))
        .and_then(|wei| wei.checked_add(fraction_wei))
        .ok_or_else(|| invalid("amount too large"))
}

/// `0x`-prefixed lowercase hex quantity without leading zeros.
pub fn to_hex_quantity(value: U256) -> String {
    format!("0x{value:x}")
}
