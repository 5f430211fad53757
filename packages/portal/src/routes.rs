//! URL paths, the views behind them and who may open them.

use std::fmt;

use common::role::{Authorities, Role};
use matchit::Router;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    SignIn,
    Dashboard,
    Awards,
    AwardDetail,
    AwardEvaluation,
    Applications,
    ApplicationDetail,
    ScoreApplication,
    Apply,
    ContinueApplication,
    ProfileSetup,
    NewProject,
    ProjectDetail,
    Categories,
    Criterias,
    Regions,
    MediaChannels,
    Judges,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Awards => "Awards",
            Self::AwardDetail => "Award",
            Self::AwardEvaluation => "Evaluation",
            Self::Applications => "Applications",
            Self::ApplicationDetail => "Application",
            Self::ScoreApplication => "Score application",
            Self::Apply => "Apply",
            Self::ContinueApplication => "Continue application",
            Self::ProfileSetup => "Profile setup",
            Self::NewProject => "New project",
            Self::ProjectDetail => "Project",
            Self::Categories => "Categories",
            Self::Criterias => "Criteria",
            Self::Regions => "Regions",
            Self::MediaChannels => "Media channels",
            Self::Judges => "Judges",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Guarded(Authorities),
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub path: &'static str,
    pub view: View,
    pub access: Access,
}

const STAFF: Authorities = Authorities(Role::STAFF);
const STAFF_AND_JUDGES: Authorities = Authorities(&[Role::SuperAdmin, Role::Admin, Role::Judge]);
const JUDGES: Authorities = Authorities(&[Role::Judge]);
const JOURNALISTS: Authorities = Authorities(&[Role::Journalist]);

const fn guarded(path: &'static str, view: View, authorities: Authorities) -> RouteDef {
    RouteDef {
        path,
        view,
        access: Access::Guarded(authorities),
    }
}

pub const ROUTES: &[RouteDef] = &[
    RouteDef {
        path: "/sign-in",
        view: View::SignIn,
        access: Access::Public,
    },
    guarded("/dashboard", View::Dashboard, Authorities::ANY),
    guarded("/awards", View::Awards, STAFF),
    guarded("/awards/{uuid}", View::AwardDetail, STAFF),
    guarded("/awards/{uuid}/evaluation", View::AwardEvaluation, STAFF_AND_JUDGES),
    guarded("/awards/{uuid}/apply", View::Apply, JOURNALISTS),
    guarded("/applications", View::Applications, STAFF_AND_JUDGES),
    guarded("/applications/{uuid}", View::ApplicationDetail, STAFF_AND_JUDGES),
    guarded("/applications/{uuid}/score", View::ScoreApplication, JUDGES),
    guarded("/my-applications/{uuid}", View::ContinueApplication, JOURNALISTS),
    guarded("/profile/setup", View::ProfileSetup, JOURNALISTS),
    guarded("/projects/new", View::NewProject, JOURNALISTS),
    guarded("/projects/{uuid}", View::ProjectDetail, JOURNALISTS),
    guarded("/categories", View::Categories, STAFF),
    guarded("/criterias", View::Criterias, STAFF),
    guarded("/regions", View::Regions, STAFF),
    guarded("/media-channels", View::MediaChannels, STAFF),
    guarded("/judges", View::Judges, Authorities(&[Role::SuperAdmin])),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("No page at {0}")]
    NotFound(String),

    #[error("Sign in to open {0}")]
    Unauthenticated(String),

    #[error("A {role} account cannot open {path}")]
    Forbidden { path: String, role: Role },

    #[error("Invalid route {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// A path resolved to its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub view: View,
    pub params: Vec<(String, String)>,
}

impl Resolved {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

pub struct RouteTable {
    router: Router<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: &[RouteDef]) -> Result<Self, RouteError> {
        let mut router = Router::new();
        for route in routes {
            router
                .insert(route.path, *route)
                .map_err(|e| RouteError::Invalid {
                    path: route.path.to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(Self { router })
    }

    pub fn standard() -> Result<Self, RouteError> {
        Self::new(ROUTES)
    }

    /// Match `path` (query string and trailing slash ignored) and check the
    /// role against the route's authorities.
    pub fn resolve(&self, path: &str, role: Option<Role>) -> Result<Resolved, RouteError> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let matched = self
            .router
            .at(path)
            .map_err(|_| RouteError::NotFound(path.to_string()))?;
        let route = matched.value;

        if let Access::Guarded(authorities) = route.access {
            let role = role.ok_or_else(|| RouteError::Unauthenticated(path.to_string()))?;
            if !authorities.allows(role) {
                tracing::debug!(path, %role, "route forbidden");
                return Err(RouteError::Forbidden {
                    path: path.to_string(),
                    role,
                });
            }
        }

        Ok(Resolved {
            view: route.view,
            params: matched
                .params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

/// Parameter-free pages a role may open, for navigation menus.
pub fn menu(role: Role) -> Vec<&'static RouteDef> {
    ROUTES
        .iter()
        .filter(|r| !r.path.contains('{'))
        .filter(|r| match r.access {
            Access::Public => false,
            Access::Guarded(authorities) => authorities.allows(role),
        })
        .collect()
}
