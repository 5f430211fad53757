pub mod config;
pub mod models;
pub mod role;
pub mod stage;
pub mod status;
pub mod validation;

pub use role::{Authorities, Role};
pub use stage::{EvaluationStage, RoundPlan, TransitionError};
pub use status::ApplicationStatus;
pub use validation::{FieldErrors, Validate, Validator};
