use serde::{Deserialize, Serialize};

/// One insurance plan as delivered by the upstream catalog.
///
/// Plans are immutable after loading; a catalog refresh replaces the whole
/// sequence rather than patching records in place. `price` is the monthly
/// premium, `rating` runs 0 to 5 inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: u64,
    pub provider: String,
    #[serde(rename = "type")]
    pub plan_type: String,
    pub price: f64,
    pub coverage: String,
    pub region: String,
    pub rating: f64,
    pub term: String,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cashback: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Plan {
    /// A cashback amount of zero counts as no cashback.
    pub fn has_cashback(&self) -> bool {
        self.cashback.is_some_and(|c| c > 0.0)
    }
}
