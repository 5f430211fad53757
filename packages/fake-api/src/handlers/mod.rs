pub mod applications;
pub mod auth;
pub mod awards;
pub mod journalists;
pub mod projects;
pub mod reference;
pub mod scores;

use common::models::Paginated;
use serde::Deserialize;

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    common::models::DEFAULT_PER_PAGE
}

/// Query accepted by every list endpoint; filters a resource ignores are unused.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub award_uuid: Option<String>,
    #[serde(default)]
    pub round_uuid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
}

impl PageQuery {
    pub fn matches_search(&self, text: &str) -> bool {
        match &self.search {
            Some(search) => text.to_lowercase().contains(&search.to_lowercase()),
            None => true,
        }
    }

    pub fn paginate<T>(&self, items: Vec<T>) -> Paginated<T> {
        let per_page = self.per_page.max(1);
        let total = items.len() as u64;
        let skip = (self.page.max(1) - 1) * per_page;
        let data = items
            .into_iter()
            .skip(skip as usize)
            .take(per_page as usize)
            .collect();
        Paginated::new(data, total, per_page)
    }
}
