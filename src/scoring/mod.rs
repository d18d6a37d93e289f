pub mod aggregate;
pub mod engine;
pub mod error;
pub mod result;

pub use aggregate::{aggregate, DashboardStats};
pub use engine::{compare, MAX_SELECTION, MIN_SELECTION};
pub use error::InputError;
pub use result::{ComparisonResult, MetricComparison, PathwaySummary};
