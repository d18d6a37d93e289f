pub mod advisories;
pub mod composer;

pub use advisories::record_advisories;
pub use composer::{compose, Recommendation, GENERAL_ADVISORIES};
