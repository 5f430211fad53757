//! One service per API resource. Services are thin: they pick the path and
//! payload shape, validate forms before sending, and hand back a `PendingRequest`.

mod applications;
mod auth;
mod award_parts;
mod awards;
mod journalists;
mod projects;
mod reference;
mod scores;

pub use applications::ApplicationService;
pub use auth::AuthService;
pub use award_parts::AwardPartService;
pub use awards::AwardService;
pub use journalists::JournalistService;
pub use projects::ProjectService;
pub use reference::ReferenceService;
pub use scores::ScoreService;
