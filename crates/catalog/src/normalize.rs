//! Merging assistant payloads into the session filter state.
//!
//! Pure and total: every payload, however malformed, yields a valid
//! FilterState. Fields the payload lacks keep their current values.

use std::sync::LazyLock;

use regex::Regex;

use crate::filter::{FilterState, Selector};
use crate::payload::AssistantFilterPayload;

/// First `<digits> - <digits>` pair in a free-text price phrase, dollar
/// signs optional on either side of each number.
static PRICE_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?(\d+)\s*-\s*\$?(\d+)").expect("valid price range pattern"));

/// Extract `(low, high)` from a phrase like `"$100 - $300"`.
///
/// The two numbers are returned in the order written. A reversed range is
/// kept reversed; it simply matches no plan.
pub fn parse_price_range(text: &str) -> Option<(f64, f64)> {
    let caps = PRICE_RANGE.captures(text)?;
    let low = caps[1].parse::<f64>().ok()?;
    let high = caps[2].parse::<f64>().ok()?;
    Some((low, high))
}

impl FilterState {
    /// Merge assistant-proposed values over this state, returning the
    /// result.
    ///
    /// Selector values are taken verbatim, without validation against the
    /// catalog: an unknown type simply matches nothing downstream. Rating
    /// and price values are likewise not clamped to the catalog's range.
    pub fn merged(&self, payload: &AssistantFilterPayload) -> FilterState {
        let mut next = self.clone();

        if let Some(t) = non_empty(&payload.plan_type) {
            next.plan_type = Selector::from(t.to_string());
        }
        if let Some(r) = non_empty(&payload.region) {
            next.region = Selector::from(r.to_string());
        }
        if let Some(t) = non_empty(&payload.term) {
            next.term = Selector::from(t.to_string());
        }
        if let Some(rating) = payload.min_rating {
            next.min_rating = rating;
        }
        if let Some(cashback) = payload.cashback_only {
            next.cashback_only = cashback;
        }
        if let Some(text) = payload.price_range.as_deref() {
            if let Some(range) = parse_price_range(text) {
                next.price_range = range;
            }
        }
        if let Some(benefits) = &payload.benefits {
            // Wholesale replacement, not a union with the previous set.
            next.benefits = benefits.clone();
        }

        next
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
