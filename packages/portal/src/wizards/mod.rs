//! The three step-gated flows built on [`crate::flow::StepFlow`].

pub mod application;
pub mod profile;
pub mod project;

pub use application::{ApplicationData, ApplicationInput, ApplicationStep, ApplicationWizard};
pub use profile::{ProfileData, ProfileInput, ProfileStep, ProfileWizard};
pub use project::{ProjectData, ProjectInput, ProjectStep, ProjectWizard};
