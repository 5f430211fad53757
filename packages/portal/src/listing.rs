use common::models::{DEFAULT_PER_PAGE, ListParams};

/// Pagination and search state owned by one list view (or one tab).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page: u64,
    per_page: u64,
    search: String,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl ListState {
    pub fn new(per_page: u64) -> Self {
        Self {
            page: 1,
            per_page: per_page.clamp(1, 100),
            search: String::new(),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// A new search always starts again from page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    pub fn set_per_page(&mut self, per_page: u64) {
        self.per_page = per_page.clamp(1, 100);
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: u64) -> bool {
        if self.page < total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn params(&self) -> ListParams {
        ListParams::new(self.page, self.per_page).with_search(self.search.as_str())
    }
}
