use anyhow::{Result, bail};
use client::{ApiClient, Session};
use portal::routes::{RouteError, RouteTable};

use crate::config::AppConfig;
use crate::session_store::SessionStore;

/// What every command gets: configuration, the API client and the session.
pub struct Context {
    pub config: AppConfig,
    pub store: SessionStore,
    pub json: bool,
    client: ApiClient,
    session: Option<Session>,
    routes: RouteTable,
}

impl Context {
    pub fn new(config: AppConfig, json: bool) -> Result<Self> {
        let client = ApiClient::from_config(&config.api)?;
        let store = SessionStore::from_config(&config.session)?;
        let session = store.load()?;
        if let Some(session) = &session {
            tracing::debug!(user = session.subject(), role = %session.role(), "session loaded");
        }
        Ok(Self {
            config,
            store,
            json,
            client,
            session,
            routes: RouteTable::standard()?,
        })
    }

    /// Client without credentials, for signing in.
    pub fn anonymous(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// An authenticated client, if the signed-in role may open `path`.
    pub fn guard(&self, path: &str) -> Result<ApiClient> {
        let role = self.session.as_ref().map(Session::role);
        match self.routes.resolve(path, role) {
            Ok(_) => {}
            Err(RouteError::Unauthenticated(_)) => {
                bail!("Not signed in. Run `fellowship login` first.")
            }
            Err(e) => return Err(e.into()),
        }
        self.authenticated()
    }

    pub fn authenticated(&self) -> Result<ApiClient> {
        match &self.session {
            Some(session) => Ok(self.client.with_token(session.token())),
            None => bail!("Not signed in. Run `fellowship login` first."),
        }
    }

    pub fn per_page(&self) -> u64 {
        self.config.api.per_page
    }
}
