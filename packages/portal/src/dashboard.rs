//! Dashboard summaries.
//!
//! Figures come only from list endpoints the other views already use: each
//! count is the `total` of a one-item page. Nothing here assumes a dedicated
//! statistics endpoint.

use client::{ApiClient, ClientError, PendingRequest};
use common::models::{ApplicationFilter, Category, Judge, ListParams, Paginated};
use common::status::ApplicationStatus;
use futures::try_join;

use crate::evaluation::SCREENING_STAGE;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSummary {
    pub awards: u64,
    pub applications: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub categories: u64,
    pub judges: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JudgeSummary {
    pub awards: u64,
    pub applications: u64,
    /// Applications still in screening.
    pub in_screening: u64,
}

fn count_params() -> ListParams {
    ListParams::new(1, 1)
}

fn total<T: Send + 'static>(request: PendingRequest<Paginated<T>>) -> PendingRequest<u64> {
    request.map(|page| page.total)
}

fn applications(client: &ApiClient, filter: ApplicationFilter) -> PendingRequest<u64> {
    total(client.applications().list(&count_params(), &filter))
}

fn with_status(status: ApplicationStatus) -> ApplicationFilter {
    ApplicationFilter {
        status: Some(status),
        ..Default::default()
    }
}

pub async fn admin_summary(client: &ApiClient) -> Result<AdminSummary, ClientError> {
    let params = count_params();
    let (awards, applications_total, pending, approved, rejected, categories, judges) = try_join!(
        total(client.awards().list(&params)).into_future(),
        applications(client, ApplicationFilter::default()).into_future(),
        applications(client, with_status(ApplicationStatus::Pending)).into_future(),
        applications(client, with_status(ApplicationStatus::Approved)).into_future(),
        applications(client, with_status(ApplicationStatus::Rejected)).into_future(),
        total(client.reference::<Category>().list(&params)).into_future(),
        total(client.reference::<Judge>().list(&params)).into_future(),
    )?;
    Ok(AdminSummary {
        awards,
        applications: applications_total,
        pending,
        approved,
        rejected,
        categories,
        judges,
    })
}

pub async fn judge_summary(client: &ApiClient) -> Result<JudgeSummary, ClientError> {
    let screening = ApplicationFilter {
        stage: Some(SCREENING_STAGE.to_string()),
        ..Default::default()
    };
    let (awards, applications_total, in_screening) = try_join!(
        total(client.awards().list(&count_params())).into_future(),
        applications(client, ApplicationFilter::default()).into_future(),
        applications(client, screening).into_future(),
    )?;
    Ok(JudgeSummary {
        awards,
        applications: applications_total,
        in_screening,
    })
}
