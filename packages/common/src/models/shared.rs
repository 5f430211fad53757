use serde::{Deserialize, Serialize};

/// Default page size for list requests.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Pagination parameters sent with every list request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Current page number (1-based).
    pub page: u64,
    pub per_page: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: None,
        }
    }
}

impl ListParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
            search: None,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }
}

/// A page of records as returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    /// Total number of matching items across all pages.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            total_pages: 0,
        }
    }
}

impl<T> Paginated<T> {
    /// Build a page, deriving `total_pages` from `total` and `per_page`.
    pub fn new(data: Vec<T>, total: u64, per_page: u64) -> Self {
        Self {
            data,
            total,
            total_pages: total.div_ceil(per_page.max(1)),
        }
    }

    pub fn has_next(&self, page: u64) -> bool {
        page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Wraps an update form with the identifier of the record it targets.
#[derive(Debug, Clone, Serialize)]
pub struct WithUuid<'a, F> {
    pub uuid: &'a str,
    #[serde(flatten)]
    pub form: &'a F,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_wire_names() {
        let params = ListParams::new(2, 25).with_search("  climate ");
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["perPage"], 25);
        assert_eq!(json["search"], "climate");

        let blank = ListParams::default().with_search("   ");
        let json = serde_json::to_value(&blank).unwrap();
        assert!(json.get("search").is_none());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], 47, 20);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next(2));
        assert!(!page.has_next(3));
    }

    #[test]
    fn test_deserializes_list_response() {
        let page: Paginated<String> =
            serde_json::from_str(r#"{"data":["a"],"total":1,"totalPages":1}"#).unwrap();
        assert_eq!(page.data, vec!["a".to_string()]);
        assert_eq!(page.total_pages, 1);
    }
}
