/// HTTP handlers
pub mod features;
pub mod health;
pub mod query;

pub use features::update_features;
pub use health::{health_check, readiness_check, root};
pub use query::execute_query;
