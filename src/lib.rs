pub mod assessment;
pub mod config;
pub mod history;
pub mod intake;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod recommend;
pub mod scoring;
