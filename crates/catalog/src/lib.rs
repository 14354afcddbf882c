pub mod facets;
pub mod filter;
pub mod matcher;
pub mod normalize;
pub mod payload;

pub use facets::{Facets, PriceBounds};
pub use filter::{FilterState, Selector};
pub use matcher::matching_plans;
pub use normalize::parse_price_range;
pub use payload::AssistantFilterPayload;
