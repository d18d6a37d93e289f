use crate::assessment::{AssessmentInput, InputParameters, MetalType, ProductionRoute};
use std::fmt;
use thiserror::Error;

pub const MIN_QUANTITY: f64 = 0.001;
pub const MAX_QUANTITY: f64 = 1_000_000.0;
pub const MIN_ENERGY: f64 = 0.1;
pub const MAX_ENERGY: f64 = 1_000_000.0;
pub const MAX_DISTANCE: f64 = 50_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    BasicInfo,
    ProductionDetails,
    EnvironmentalData,
    Review,
}

impl Step {
    pub const COUNT: usize = 4;

    pub fn next(&self) -> Option<Step> {
        match self {
            Step::BasicInfo => Some(Step::ProductionDetails),
            Step::ProductionDetails => Some(Step::EnvironmentalData),
            Step::EnvironmentalData => Some(Step::Review),
            Step::Review => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Step::BasicInfo => None,
            Step::ProductionDetails => Some(Step::BasicInfo),
            Step::EnvironmentalData => Some(Step::ProductionDetails),
            Step::Review => Some(Step::EnvironmentalData),
        }
    }

    /// 1-based position, for "Step 2 of 4"
    pub fn number(&self) -> usize {
        match self {
            Step::BasicInfo => 1,
            Step::ProductionDetails => 2,
            Step::EnvironmentalData => 3,
            Step::Review => 4,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::BasicInfo => "Basic info",
            Step::ProductionDetails => "Production details",
            Step::EnvironmentalData => "Environmental data",
            Step::Review => "Review",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error("{step} is incomplete: {}", .errors.join("; "))]
    Invalid { step: Step, errors: Vec<String> },

    #[error("cannot finish from the {0} step")]
    NotAtReview(Step),
}

/// Answers collected so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeDraft {
    pub name: Option<String>,
    pub metal_type: Option<MetalType>,
    pub quantity: Option<f64>,
    pub production_route: Option<ProductionRoute>,
    pub parameters: InputParameters,
}

impl IntakeDraft {
    fn check_basic_info(&self, errors: &mut Vec<String>) {
        if self.metal_type.is_none() {
            errors.push("metal_type: required".to_string());
        }
        match self.quantity {
            None => errors.push("quantity: required".to_string()),
            Some(q) if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&q) => errors.push(format!(
                "quantity: must be between {} and {} kg",
                MIN_QUANTITY, MAX_QUANTITY
            )),
            Some(_) => {}
        }
    }

    fn check_production_details(&self, errors: &mut Vec<String>) {
        if self.production_route.is_none() {
            errors.push("production_route: required".to_string());
        }
        if let Some(ratio) = self.parameters.recycled_content {
            if !(0.0..=1.0).contains(&ratio) {
                errors.push("recycled_content: must be between 0 and 1".to_string());
            }
        }
        if let Some(km) = self.parameters.transport_distance {
            if !(0.0..=MAX_DISTANCE).contains(&km) {
                errors.push(format!(
                    "transport_distance: must be between 0 and {} km",
                    MAX_DISTANCE
                ));
            }
        }
    }

    fn check_environmental_data(&self, errors: &mut Vec<String>) {
        let params = &self.parameters;
        if let Some(energy) = params.energy_consumption {
            if !(MIN_ENERGY..=MAX_ENERGY).contains(&energy) {
                errors.push(format!(
                    "energy_consumption: must be between {} and {}",
                    MIN_ENERGY, MAX_ENERGY
                ));
            }
        }
        if let Some(waste) = params.waste_generation {
            if waste.is_nan() || waste < 0.0 {
                errors.push("waste_generation: must be non-negative".to_string());
            }
        }
        if let Some(temp) = params.process_temperature {
            if temp.is_nan() || temp <= 0.0 {
                errors.push("process_temperature: must be positive".to_string());
            }
        }
    }

    /// Errors that keep `step` from being left
    pub fn errors_for(&self, step: Step) -> Vec<String> {
        let mut errors = Vec::new();
        match step {
            Step::BasicInfo => self.check_basic_info(&mut errors),
            Step::ProductionDetails => self.check_production_details(&mut errors),
            Step::EnvironmentalData => self.check_environmental_data(&mut errors),
            Step::Review => {
                self.check_basic_info(&mut errors);
                self.check_production_details(&mut errors);
                self.check_environmental_data(&mut errors);
            }
        }
        errors
    }
}

/// Multi-step intake for a new assessment.
///
/// Moving forward requires the current step to be valid; moving back is
/// always allowed. Only the review step can produce an [`AssessmentInput`].
#[derive(Debug, Clone, Default)]
pub struct IntakeWizard {
    step: Step,
    draft: IntakeDraft,
}

impl IntakeWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &IntakeDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut IntakeDraft {
        &mut self.draft
    }

    pub fn validate(&self) -> Result<(), IntakeError> {
        let errors = self.draft.errors_for(self.step);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(IntakeError::Invalid {
                step: self.step,
                errors,
            })
        }
    }

    /// Advance one step if the current one is valid. At the review step
    /// this only re-validates.
    pub fn next(&mut self) -> Result<Step, IntakeError> {
        self.validate()?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn finish(&self) -> Result<AssessmentInput, IntakeError> {
        if self.step != Step::Review {
            return Err(IntakeError::NotAtReview(self.step));
        }
        self.validate()?;

        let draft = &self.draft;
        match (draft.metal_type, draft.production_route, draft.quantity) {
            (Some(metal_type), Some(production_route), Some(quantity)) => Ok(AssessmentInput {
                name: draft.name.clone(),
                metal_type,
                production_route,
                quantity,
                parameters: draft.parameters.clone(),
            }),
            // validate() already rejected missing required fields
            _ => Err(IntakeError::Invalid {
                step: Step::Review,
                errors: vec!["required fields missing".to_string()],
            }),
        }
    }
}
