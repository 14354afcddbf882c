use serde::{Deserialize, Serialize};

use crate::facets::PriceBounds;

/// A facet selector: the wildcard (no restriction) or one concrete value.
///
/// On the wire this is a plain string, with `"All"` as the wildcard, so it
/// round-trips with the UI's dropdown values unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    All,
    Only(String),
}

impl Selector {
    /// True when this selector places no restriction or equals `value`
    /// exactly (case-sensitive).
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(v) => v == value,
        }
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        if s == "All" {
            Selector::All
        } else {
            Selector::Only(s)
        }
    }
}

impl From<Selector> for String {
    fn from(s: Selector) -> String {
        match s {
            Selector::All => "All".to_string(),
            Selector::Only(v) => v,
        }
    }
}

/// The session's current filter selections.
///
/// Owned by a single logical session and replaced either field-by-field
/// (direct UI edits) or through [`FilterState::merged`] (assistant
/// payloads). The price range is inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(rename = "type")]
    pub plan_type: Selector,
    pub region: Selector,
    pub term: Selector,
    pub price_range: (f64, f64),
    pub min_rating: f64,
    /// Required benefits. Empty means no restriction.
    pub benefits: Vec<String>,
    pub cashback_only: bool,
}

impl FilterState {
    /// The unrestricted state for a catalog with the given price bounds:
    /// wildcards everywhere, the full price range, no rating floor, no
    /// required benefits, cashback-only off.
    ///
    /// An empty catalog has no bounds and the range degenerates to (0, 0),
    /// which is harmless since matching over an empty catalog yields nothing
    /// regardless.
    pub fn unrestricted(bounds: Option<PriceBounds>) -> Self {
        let price_range = bounds.map_or((0.0, 0.0), |b| (b.min, b.max));
        Self {
            plan_type: Selector::All,
            region: Selector::All,
            term: Selector::All,
            price_range,
            min_rating: 0.0,
            benefits: Vec::new(),
            cashback_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_round_trips_through_strings() {
        let all: Selector = serde_json::from_str(r#""All""#).unwrap();
        assert_eq!(all, Selector::All);
        assert_eq!(serde_json::to_string(&all).unwrap(), r#""All""#);

        let health: Selector = serde_json::from_str(r#""Health""#).unwrap();
        assert_eq!(health, Selector::Only("Health".into()));
        assert_eq!(serde_json::to_string(&health).unwrap(), r#""Health""#);
    }

    #[test]
    fn selector_admits() {
        assert!(Selector::All.admits("Health"));
        assert!(Selector::Only("Health".into()).admits("Health"));
        assert!(!Selector::Only("Health".into()).admits("health"));
        assert!(!Selector::Only("Health".into()).admits("Auto"));
    }

    #[test]
    fn unrestricted_uses_catalog_bounds() {
        let state = FilterState::unrestricted(Some(PriceBounds { min: 30.0, max: 200.0 }));
        assert_eq!(state.price_range, (30.0, 200.0));
        assert_eq!(state.plan_type, Selector::All);
        assert_eq!(state.min_rating, 0.0);
        assert!(state.benefits.is_empty());
        assert!(!state.cashback_only);
    }

    #[test]
    fn unrestricted_without_bounds_degenerates() {
        let state = FilterState::unrestricted(None);
        assert_eq!(state.price_range, (0.0, 0.0));
    }

    #[test]
    fn filter_state_wire_shape() {
        let state = FilterState {
            plan_type: Selector::Only("Health".into()),
            region: Selector::All,
            term: Selector::All,
            price_range: (100.0, 300.0),
            min_rating: 4.0,
            benefits: vec!["Dental".into()],
            cashback_only: true,
        };

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["type"], "Health");
        assert_eq!(json["region"], "All");
        assert_eq!(json["priceRange"], serde_json::json!([100.0, 300.0]));
        assert_eq!(json["minRating"], 4.0);
        assert_eq!(json["cashbackOnly"], true);

        let back: FilterState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
