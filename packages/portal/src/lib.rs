//! UI orchestration for the award-program portal: step-gated wizards, list
//! state, cancellable data loads, the evaluation board, route guards and
//! dashboards. Rendering is left to the front-end.

pub mod dashboard;
pub mod evaluation;
pub mod flow;
pub mod listing;
pub mod resource;
pub mod routes;
pub mod scoring;
pub mod wizards;

pub use evaluation::{EvaluationBoard, EvaluationError, Tab, default_tab};
pub use flow::{FlowError, StepFlow, Wizard};
pub use listing::ListState;
pub use resource::{LoadState, Resource};
pub use routes::{Resolved, RouteError, RouteTable, View};
pub use scoring::ScoreSheet;
