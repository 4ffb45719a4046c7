//! Saturating arithmetic for money totals
//!
//! Decoded amounts may sit anywhere in `Decimal`'s range. Sums, differences
//! and ratios clamp to `Decimal::MIN`/`Decimal::MAX` instead of panicking.

use rust_decimal::Decimal;

fn limit(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

pub fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| limit(b.is_sign_negative()))
}

pub fn sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| limit(!b.is_sign_negative()))
}

/// `*total += amount`, saturating
pub fn add_into(total: &mut Decimal, amount: Decimal) {
    *total = add(*total, amount);
}

pub fn sum<'a, I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = &'a Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| add(acc, *amount))
}

/// `part / whole * 100`, or zero when `whole` is zero
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| limit(part.is_sign_negative() != whole.is_sign_negative()))
}
