//! Checked wide-integer helpers backing the pricing and conversion math.

use crate::errors::Error;

/// Floor of `a * b / d` without requiring the full product `a * b` to fit.
///
/// Splits `a` by `d` so the only true product is `(a % d) * b`; the result
/// is exact (identical to the floor of the mathematical quotient). Returns
/// `None` when `d == 0` or an intermediate overflows u128.
pub fn mul_div_floor(a: u128, b: u128, d: u128) -> Option<u128> {
    if d == 0 {
        return None;
    }
    let whole = (a / d).checked_mul(b)?;
    let part = (a % d).checked_mul(b)? / d;
    whole.checked_add(part)
}

pub fn pow10(exp: u32) -> Option<u128> {
    10u128.checked_pow(exp)
}

/// Widens a token amount for intermediate math. Negative amounts are out of
/// domain for every caller and surface as `Overflow`.
pub fn to_wide(amount: i128) -> Result<u128, Error> {
    u128::try_from(amount).map_err(|_| Error::Overflow)
}

/// Narrows a computed value back to the i128 token domain.
pub fn to_amount(value: u128) -> Result<i128, Error> {
    i128::try_from(value).map_err(|_| Error::Overflow)
}
