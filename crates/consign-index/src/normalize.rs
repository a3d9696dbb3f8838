//! Field coercion from a [`RawRow`] to a typed [`StoreRecord`].
//!
//! Coercion never fails: every malformed or missing field degrades to its
//! default (`""`, `0`, or `false`) so one bad cell cannot reject a row.

use consign_core::StoreRecord;

use crate::raw::{columns, RawRow};

/// Coerces one source row into a [`StoreRecord`].
#[must_use]
pub fn coerce_row(row: &RawRow) -> StoreRecord {
    let flag = |column: &str| parse_yes_no(&row.text(column));

    StoreRecord {
        business_name: row.text(columns::BUSINESS_NAME),
        address: row.text(columns::ADDRESS),
        city: row.text(columns::CITY).trim().to_string(),
        state: row.text(columns::STATE).trim().to_string(),
        review_count: parse_review_count(&row.text(columns::NUMBER_OF_REVIEWS)),
        site: row.text(columns::SITE),
        phone: row.text(columns::PHONE),
        photo: row.text(columns::PHOTO),
        seo_description: row.text(columns::SEO_DESCRIPTION),
        pricing: flag(columns::PRICING),
        wide_selection: flag(columns::WIDE_SELECTION),
        sell_antiques: flag(columns::SELL_ANTIQUES),
        sell_books: flag(columns::SELL_BOOKS),
        clean_organized: flag(columns::CLEAN_ORGANIZED),
        sell_clothes: flag(columns::SELL_CLOTHES),
        sell_furniture: flag(columns::SELL_FURNITURE),
        sell_jewelry: flag(columns::SELL_JEWELRY),
        sell_gift_items: flag(columns::SELL_GIFT_ITEMS),
        sell_premium_brand: flag(columns::SELL_PREMIUM_BRAND),
        sell_merchandise: flag(columns::SELL_MERCHANDISE),
        friendly_employees: flag(columns::FRIENDLY_EMPLOYEES),
    }
}

/// `true` only for a case-insensitive exact match on `"yes"`.
///
/// No trimming: `" yes"`, `"y"`, `"true"` and `"1"` are all `false`.
#[must_use]
pub fn parse_yes_no(value: &str) -> bool {
    value.eq_ignore_ascii_case("yes")
}

/// Parses the leading integer of `value`.
///
/// Leading whitespace and a sign are accepted and parsing stops at the first
/// non-digit, so `"12 reviews"` is 12 and `"10.7"` is 10. No digits yields 0,
/// negative values clamp to 0, and overflow saturates at `u32::MAX`.
#[must_use]
pub fn parse_review_count(value: &str) -> u32 {
    let s = value.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut count: u32 = 0;
    let mut saw_digit = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        saw_digit = true;
        count = count.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if !saw_digit || negative {
        0
    } else {
        count
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
