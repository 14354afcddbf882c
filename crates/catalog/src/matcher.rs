use tracing::debug;

use planscout_core::Plan;

use crate::filter::FilterState;

/// Select the plans admitted by every active filter clause.
///
/// A single forward pass over the catalog; the result is a sub-sequence of
/// `plans` in the original order. Safe to re-invoke on every state change
/// with identical results for identical inputs.
pub fn matching_plans<'a>(plans: &'a [Plan], filters: &FilterState) -> Vec<&'a Plan> {
    let matched: Vec<&Plan> = plans.iter().filter(|p| admits(p, filters)).collect();
    debug!("{} of {} plans match", matched.len(), plans.len());
    matched
}

fn admits(plan: &Plan, filters: &FilterState) -> bool {
    let (low, high) = filters.price_range;
    filters.plan_type.admits(&plan.plan_type)
        && filters.region.admits(&plan.region)
        && filters.term.admits(&plan.term)
        && plan.price >= low
        && plan.price <= high
        && plan.rating >= filters.min_rating
        && (!filters.cashback_only || plan.has_cashback())
        && (filters.benefits.is_empty()
            || filters.benefits.iter().all(|b| plan.benefits.contains(b)))
}
