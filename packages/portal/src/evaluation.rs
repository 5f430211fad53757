//! Round/tab selector for the evaluation screens.
//!
//! The board shows "All", "Screening" and one tab per round. Each tab keeps its
//! own pagination. "Complete Screening" and "Complete Round" go through the
//! stage machine first and the award is re-read afterwards, so the server's
//! view of the current round always wins.

use std::collections::HashMap;
use std::fmt;

use client::{ApiClient, ClientError, RequestScope};
use common::models::{
    ApplicationAward, ApplicationFilter, Award, DEFAULT_PER_PAGE, InitializeRoundRequest,
    Paginated,
};
use common::stage::{EvaluationStage, RoundPlan, Transition, TransitionError};
use thiserror::Error;

use crate::listing::ListState;
use crate::resource::{LoadState, Resource};

pub const SCREENING_STAGE: &str = "screening";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tab {
    All,
    Screening,
    /// A round, by uuid.
    Round(String),
}

impl Tab {
    /// Stable key: `all`, `screening` or the round uuid.
    pub fn key(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Screening => SCREENING_STAGE,
            Self::Round(uuid) => uuid,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The current round's tab, or Screening when no round is current.
pub fn default_tab(award: &Award) -> Tab {
    match award.current_round() {
        Some(round) => Tab::Round(round.uuid.clone()),
        None => Tab::Screening,
    }
}

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("{action} is not available during {stage}")]
    WrongStage {
        action: &'static str,
        stage: EvaluationStage,
    },

    #[error("Round {0} is not part of this award")]
    UnknownTab(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Request(#[from] ClientError),
}

impl EvaluationError {
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Request(err) => err.notification(),
            other => Some(other.to_string()),
        }
    }
}

pub type ApplicationPage = Paginated<ApplicationAward>;

pub struct EvaluationBoard {
    client: ApiClient,
    award: Award,
    plan: RoundPlan,
    stage: EvaluationStage,
    tab: Tab,
    lists: HashMap<Tab, ListState>,
    per_page: u64,
    applications: Resource<ApplicationPage>,
    scope: RequestScope,
}

impl EvaluationBoard {
    /// Fetch the award with its rounds, pick the default tab and start
    /// loading its applications.
    pub async fn open(client: ApiClient, award_uuid: &str) -> Result<Self, ClientError> {
        Self::open_with_page_size(client, award_uuid, DEFAULT_PER_PAGE).await
    }

    /// Like [`open`](Self::open), with every tab paged by `per_page`.
    pub async fn open_with_page_size(
        client: ApiClient,
        award_uuid: &str,
        per_page: u64,
    ) -> Result<Self, ClientError> {
        let award = client.awards().show(award_uuid).await?;
        let mut board = Self::with_award(client, award);
        board.per_page = per_page;
        board.refresh();
        Ok(board)
    }

    fn with_award(client: ApiClient, award: Award) -> Self {
        let plan = RoundPlan::from_award(&award);
        let stage = EvaluationStage::from_award(&award);
        let tab = default_tab(&award);
        tracing::debug!(award = %award.uuid, %stage, %tab, "evaluation board opened");
        Self {
            client,
            award,
            plan,
            stage,
            tab,
            lists: HashMap::new(),
            per_page: DEFAULT_PER_PAGE,
            applications: Resource::new(),
            scope: RequestScope::new(),
        }
    }

    pub fn award(&self) -> &Award {
        &self.award
    }

    pub fn plan(&self) -> &RoundPlan {
        &self.plan
    }

    pub fn stage(&self) -> EvaluationStage {
        self.stage
    }

    pub fn current_tab(&self) -> &Tab {
        &self.tab
    }

    pub fn tabs(&self) -> Vec<Tab> {
        let mut tabs = vec![Tab::All, Tab::Screening];
        tabs.extend(self.plan.rounds().iter().map(|r| Tab::Round(r.uuid.clone())));
        tabs
    }

    pub fn tab_label(&self, tab: &Tab) -> String {
        match tab {
            Tab::All => "All".to_string(),
            Tab::Screening => "Screening".to_string(),
            Tab::Round(uuid) => self
                .plan
                .by_uuid(uuid)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| uuid.clone()),
        }
    }

    /// Pagination of the current tab.
    pub fn list(&self) -> ListState {
        self.list_for(&self.tab)
    }

    pub fn list_for(&self, tab: &Tab) -> ListState {
        self.lists
            .get(tab)
            .cloned()
            .unwrap_or_else(|| ListState::new(self.per_page))
    }

    pub fn filter_for(&self, tab: &Tab) -> ApplicationFilter {
        let mut filter = ApplicationFilter {
            award_uuid: Some(self.award.uuid.clone()),
            ..Default::default()
        };
        match tab {
            Tab::All => {}
            Tab::Screening => filter.stage = Some(SCREENING_STAGE.to_string()),
            Tab::Round(uuid) => filter.round_uuid = Some(uuid.clone()),
        }
        filter
    }

    pub fn applications(&self) -> &Resource<ApplicationPage> {
        &self.applications
    }

    /// Wait for the current tab's list to finish loading.
    pub async fn settled(&self) -> LoadState<ApplicationPage> {
        self.applications.settled().await
    }

    /// Switch tabs and fetch that tab's page. The tab keeps its own pagination.
    pub fn select_tab(&mut self, tab: Tab) -> Result<(), EvaluationError> {
        if let Tab::Round(uuid) = &tab
            && self.plan.by_uuid(uuid).is_none()
        {
            return Err(EvaluationError::UnknownTab(uuid.clone()));
        }
        self.tab = tab;
        self.refresh();
        Ok(())
    }

    pub fn search(&mut self, text: &str) {
        self.list_mut().set_search(text);
        self.refresh();
    }

    pub fn set_page(&mut self, page: u64) {
        self.list_mut().set_page(page);
        self.refresh();
    }

    fn list_mut(&mut self) -> &mut ListState {
        let per_page = self.per_page;
        self.lists
            .entry(self.tab.clone())
            .or_insert_with(|| ListState::new(per_page))
    }

    /// Re-fetch the current tab. A fetch still in flight is cancelled.
    pub fn refresh(&self) {
        let params = self.list().params();
        let filter = self.filter_for(&self.tab);
        self.applications
            .load(self.client.applications().list(&params, &filter));
    }

    /// Close screening and open the first round.
    pub async fn complete_screening(&mut self) -> Result<Transition, EvaluationError> {
        if self.stage != EvaluationStage::Screening {
            return Err(EvaluationError::WrongStage {
                action: "Complete Screening",
                stage: self.stage,
            });
        }
        self.advance().await
    }

    /// Close the current round and open the next one.
    pub async fn complete_round(&mut self) -> Result<Transition, EvaluationError> {
        if self.stage == EvaluationStage::Screening {
            return Err(EvaluationError::WrongStage {
                action: "Complete Round",
                stage: self.stage,
            });
        }
        self.advance().await
    }

    async fn advance(&mut self) -> Result<Transition, EvaluationError> {
        let transition = self.stage.complete(&self.plan)?;
        let request = InitializeRoundRequest {
            award_uuid: self.award.uuid.clone(),
            round_uuid: Some(transition.opens_round.clone()),
        };
        tracing::info!(
            award = %self.award.uuid,
            from = %transition.from,
            to = %transition.to,
            "completing stage"
        );
        self.scope
            .track(self.client.scores().initialize_round(&request))
            .await?;

        if let Err(err) = self.reload().await {
            // The round is open on the server even though the re-read failed.
            tracing::warn!(award = %self.award.uuid, "re-read failed after completion: {}", err);
            self.assume_round_opened(&transition.opens_round);
            return Err(err);
        }
        if self.stage != transition.to {
            tracing::warn!(
                expected = %transition.to,
                actual = %self.stage,
                "server reports a different stage after completion"
            );
        }
        Ok(transition)
    }

    /// Re-read the award and adopt the server's current round.
    pub async fn reload(&mut self) -> Result<(), EvaluationError> {
        let award = self
            .scope
            .latest("award", self.client.awards().show(&self.award.uuid))
            .await?;
        self.adopt(award);
        Ok(())
    }

    /// Mark `round_uuid` as the current round without asking the server.
    fn assume_round_opened(&mut self, round_uuid: &str) {
        let mut award = self.award.clone();
        for round in &mut award.rounds {
            round.is_current = round.uuid == round_uuid;
        }
        self.adopt(award);
    }

    fn adopt(&mut self, award: Award) {
        self.plan = RoundPlan::from_award(&award);
        self.stage = EvaluationStage::from_award(&award);
        self.tab = default_tab(&award);
        self.award = award;
        self.refresh();
    }
}
