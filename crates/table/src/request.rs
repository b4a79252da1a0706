//! Paged query/response pair for list endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::column::TableRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Current sort column and direction, owned by the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(sort_by: impl Into<String>) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_direction: SortDirection::Asc,
        }
    }

    /// Sort toggle for a header click on `key`.
    ///
    /// Clicking the column that is currently sorted ascending flips it to
    /// descending. Any other click (another column, or the same column while
    /// descending) sorts ascending on the clicked column.
    pub fn toggled(&self, key: &str) -> Self {
        let sort_direction = if self.sort_by == key && self.sort_direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };

        Self {
            sort_by: key.to_string(),
            sort_direction,
        }
    }
}

/// Query for one page of a server-side list. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    page_size: u32,
    pub sort: SortConfig,
    /// Column key → filter text. Empty values are treated as absent.
    pub filters: BTreeMap<String, String>,
}

impl PageRequest {
    /// `page_size` of zero is bumped to one; a page always holds a row.
    pub fn new(page_size: u32, sort: SortConfig) -> Self {
        Self {
            page_number: 0,
            page_size: page_size.max(1),
            sort,
            filters: BTreeMap::new(),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page_number = 0;
    }

    /// Set (or clear, when `value` is blank) the filter for a column.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        if value.trim().is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_string(), value.to_string());
        }
    }

    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as list-endpoint query parameters.
    ///
    /// The first active filter (by key order) goes out as
    /// `filterBy`/`filterValue`; any further ones as plain `key=value`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page_number.to_string()),
            ("size".to_string(), self.page_size.to_string()),
            ("sortBy".to_string(), self.sort.sort_by.clone()),
            (
                "sortDirection".to_string(),
                self.sort.sort_direction.as_str().to_string(),
            ),
        ];

        let mut filters = self.active_filters();
        if let Some((key, value)) = filters.next() {
            pairs.push(("filterBy".to_string(), key.to_string()));
            pairs.push(("filterValue".to_string(), value.to_string()));
        }
        for (key, value) in filters {
            pairs.push((key.to_string(), value.to_string()));
        }

        pairs
    }
}

/// One page as returned by the API. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
        }
    }
}

impl<T: TableRow> PageResult<T> {
    /// Page an unpaged list the way a list endpoint would: keep rows whose
    /// field contains every active filter (case-insensitive), sort by the
    /// requested field text, then cut out `request.page_number`.
    pub fn paginate(rows: Vec<T>, request: &PageRequest) -> Self {
        let filters: Vec<(&str, String)> = request
            .active_filters()
            .map(|(key, value)| (key, value.trim().to_lowercase()))
            .collect();
        let mut rows: Vec<T> = rows
            .into_iter()
            .filter(|row| {
                filters.iter().all(|(key, needle)| {
                    row.field(key).to_string().to_lowercase().contains(needle.as_str())
                })
            })
            .collect();

        let key = request.sort.sort_by.as_str();
        rows.sort_by_cached_key(|row| row.field(key).to_string().to_lowercase());
        if request.sort.sort_direction == SortDirection::Desc {
            rows.reverse();
        }

        let size = request.page_size() as usize;
        let total_elements = rows.len() as u64;
        let total_pages = rows.len().div_ceil(size) as u32;
        let content = rows
            .into_iter()
            .skip(request.page_number as usize * size)
            .take(size)
            .collect();

        Self {
            content,
            total_elements,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn toggle_flips_ascending_column() {
        let sort = SortConfig::ascending("name");
        assert_eq!(
            sort.toggled("name"),
            SortConfig {
                sort_by: "name".to_string(),
                sort_direction: SortDirection::Desc
            }
        );
    }

    #[test]
    fn toggle_other_column_sorts_ascending() {
        let sort = SortConfig::ascending("name");
        assert_eq!(sort.toggled("email"), SortConfig::ascending("email"));
    }

    #[test]
    fn toggle_descending_column_returns_to_ascending() {
        let sort = SortConfig::ascending("name").toggled("name");
        assert_eq!(sort.toggled("name"), SortConfig::ascending("name"));
    }

    #[test]
    fn query_pairs_encode_paging_sort_and_filters() {
        let mut req = PageRequest::new(10, SortConfig::ascending("nombre"));
        req.page_number = 2;
        req.set_filter("status", "SCHEDULED");
        req.set_filter("client", "ana");
        req.set_filter("pet", "   ");

        let pairs = req.query_pairs();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());

        assert_eq!(get("page"), Some("2"));
        assert_eq!(get("size"), Some("10"));
        assert_eq!(get("sortBy"), Some("nombre"));
        assert_eq!(get("sortDirection"), Some("ASC"));
        assert_eq!(get("filterBy"), Some("client"));
        assert_eq!(get("filterValue"), Some("ana"));
        assert_eq!(get("status"), Some("SCHEDULED"));
        assert_eq!(get("pet"), None);
    }

    #[test]
    fn page_result_tolerates_missing_totals() {
        let page: PageResult<serde_json::Value> =
            serde_json::from_str(r#"{"content":[{"id":1}]}"#).unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn paginate_filters_sorts_and_slices() {
        let rows: Vec<serde_json::Value> = ["Luna", "bruno", "Max", "Milo", "Coco"]
            .iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect();

        let mut req = PageRequest::new(2, SortConfig::ascending("name"));
        let page = PageResult::paginate(rows.clone(), &req);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content[0]["name"], "bruno");
        assert_eq!(page.content[1]["name"], "Coco");

        req.page_number = 2;
        let last = PageResult::paginate(rows.clone(), &req);
        assert_eq!(last.content.len(), 1);
        assert_eq!(last.content[0]["name"], "Milo");

        let mut req = PageRequest::new(10, SortConfig::ascending("name").toggled("name"));
        req.set_filter("name", "M");
        let page = PageResult::paginate(rows, &req);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.content[0]["name"], "Milo");
        assert_eq!(page.content[1]["name"], "Max");
    }

    #[test]
    fn paginate_empty_list_has_no_pages() {
        let page = PageResult::<serde_json::Value>::paginate(
            Vec::new(),
            &PageRequest::new(10, SortConfig::ascending("name")),
        );
        assert_eq!(page, PageResult::empty());
    }

    proptest! {
        #[test]
        fn toggle_always_targets_clicked_column(
            current in "[a-z]{1,8}",
            clicked in "[a-z]{1,8}",
            descending in any::<bool>(),
        ) {
            let sort = SortConfig {
                sort_by: current.clone(),
                sort_direction: if descending { SortDirection::Desc } else { SortDirection::Asc },
            };
            let next = sort.toggled(&clicked);

            prop_assert_eq!(&next.sort_by, &clicked);
            let expect_desc = current == clicked && !descending;
            prop_assert_eq!(next.sort_direction == SortDirection::Desc, expect_desc);
        }
    }
}
