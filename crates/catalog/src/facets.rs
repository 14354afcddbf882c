use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

use planscout_core::Plan;

/// Lowest and highest plan price in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// Facet option sets derived from the catalog.
///
/// Value lists keep the catalog's order of first appearance so dropdowns
/// stay stable across recomputes. `price_bounds` is `None` for an empty
/// catalog; callers suppress the range control rather than render NaN.
#[derive(Debug, Clone, Serialize)]
pub struct Facets {
    pub types: Vec<String>,
    pub regions: Vec<String>,
    pub terms: Vec<String>,
    /// Distinct benefit strings across all plans, flattened.
    pub benefits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_bounds: Option<PriceBounds>,
}

impl Facets {
    /// Scan the catalog once and collect every facet option set.
    pub fn from_plans(plans: &[Plan]) -> Self {
        let mut types: IndexSet<String> = IndexSet::new();
        let mut regions: IndexSet<String> = IndexSet::new();
        let mut terms: IndexSet<String> = IndexSet::new();
        let mut benefits: IndexSet<String> = IndexSet::new();
        let mut price_bounds: Option<PriceBounds> = None;

        for plan in plans {
            types.insert(plan.plan_type.clone());
            regions.insert(plan.region.clone());
            terms.insert(plan.term.clone());
            for benefit in &plan.benefits {
                benefits.insert(benefit.clone());
            }
            price_bounds = Some(match price_bounds {
                None => PriceBounds { min: plan.price, max: plan.price },
                Some(b) => PriceBounds {
                    min: b.min.min(plan.price),
                    max: b.max.max(plan.price),
                },
            });
        }

        let facets = Facets {
            types: types.into_iter().collect(),
            regions: regions.into_iter().collect(),
            terms: terms.into_iter().collect(),
            benefits: benefits.into_iter().collect(),
            price_bounds,
        };

        debug!(
            "Facets built: {} types, {} regions, {} terms, {} benefits",
            facets.types.len(),
            facets.regions.len(),
            facets.terms.len(),
            facets.benefits.len()
        );

        facets
    }

    /// Render the option sets as plain text for the interpreter's system
    /// prompt.
    pub fn to_system_prompt(&self) -> String {
        if self.types.is_empty() {
            return "The catalog is currently empty.".to_string();
        }

        let mut lines = Vec::new();
        lines.push(format!("Plan types: {}", self.types.join(", ")));
        lines.push(format!("Regions: {}", self.regions.join(", ")));
        lines.push(format!("Terms: {}", self.terms.join(", ")));
        if self.benefits.is_empty() {
            lines.push("Benefits: (none listed)".to_string());
        } else {
            lines.push(format!("Benefits: {}", self.benefits.join(", ")));
        }
        if let Some(b) = self.price_bounds {
            lines.push(format!("Prices run from ${} to ${} per month.", b.min, b.max));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: u64, plan_type: &str, region: &str, term: &str, price: f64, benefits: &[&str]) -> Plan {
        Plan {
            id,
            provider: format!("Provider {id}"),
            plan_type: plan_type.into(),
            price,
            coverage: "Coverage".into(),
            region: region.into(),
            rating: 4.0,
            term: term.into(),
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
            cashback: None,
            icon: None,
            url: None,
        }
    }

    #[test]
    fn facet_values_keep_first_appearance_order() {
        let plans = vec![
            plan(1, "Health", "Europe", "1 year", 120.0, &["Dental", "Vision"]),
            plan(2, "Auto", "Asia", "6 months", 45.0, &["Roadside Assistance", "Dental"]),
            plan(3, "Health", "Europe", "2 years", 150.0, &["Vision"]),
        ];

        let facets = Facets::from_plans(&plans);
        assert_eq!(facets.types, vec!["Health", "Auto"]);
        assert_eq!(facets.regions, vec!["Europe", "Asia"]);
        assert_eq!(facets.terms, vec!["1 year", "6 months", "2 years"]);
        assert_eq!(facets.benefits, vec!["Dental", "Vision", "Roadside Assistance"]);
    }

    #[test]
    fn price_bounds_span_the_catalog() {
        let plans = vec![
            plan(1, "Health", "Europe", "1 year", 120.0, &[]),
            plan(2, "Auto", "Asia", "6 months", 45.0, &[]),
            plan(3, "Life", "Global", "2 years", 310.0, &[]),
        ];

        let facets = Facets::from_plans(&plans);
        assert_eq!(facets.price_bounds, Some(PriceBounds { min: 45.0, max: 310.0 }));
    }

    #[test]
    fn single_plan_bounds_collapse() {
        let plans = vec![plan(1, "Health", "Europe", "1 year", 99.0, &[])];
        let facets = Facets::from_plans(&plans);
        assert_eq!(facets.price_bounds, Some(PriceBounds { min: 99.0, max: 99.0 }));
    }

    #[test]
    fn empty_catalog_yields_empty_facets_and_no_bounds() {
        let facets = Facets::from_plans(&[]);
        assert!(facets.types.is_empty());
        assert!(facets.regions.is_empty());
        assert!(facets.terms.is_empty());
        assert!(facets.benefits.is_empty());
        assert_eq!(facets.price_bounds, None);
    }

    #[test]
    fn system_prompt_lists_options() {
        let plans = vec![
            plan(1, "Health", "Europe", "1 year", 120.0, &["Dental"]),
            plan(2, "Auto", "Asia", "6 months", 45.0, &[]),
        ];

        let prompt = Facets::from_plans(&plans).to_system_prompt();
        assert!(prompt.contains("Plan types: Health, Auto"));
        assert!(prompt.contains("Regions: Europe, Asia"));
        assert!(prompt.contains("Benefits: Dental"));
        assert!(prompt.contains("$45 to $120"));
    }

    #[test]
    fn system_prompt_for_empty_catalog() {
        let prompt = Facets::from_plans(&[]).to_system_prompt();
        assert_eq!(prompt, "The catalog is currently empty.");
    }
}
