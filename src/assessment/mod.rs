pub mod quality;
pub mod types;

pub use quality::{quality_report, QualityReport};
pub use types::{
    AssessmentInput, AssessmentRecord, EndOfLife, InputParameters, MetalType, ProductionRoute,
};
