use serde::{Deserialize, Serialize};

/// Maximum numbered page buttons shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// Pagination state passed to the table: the request's page/size plus the
/// totals from the last response. Page numbers are 0-indexed here and
/// displayed 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn previous_disabled(&self) -> bool {
        self.page_number == 0
    }

    /// Disabled on the last page, and when there are no pages at all.
    pub fn next_disabled(&self) -> bool {
        self.page_number.saturating_add(1) >= self.total_pages
    }

    /// `"{first}–{last} of {total}"`, or `"0–0 of 0"` for an empty result.
    pub fn summary(&self) -> String {
        if self.total_elements == 0 {
            return "0–0 of 0".to_string();
        }

        let size = u64::from(self.page_size.max(1));
        let page = u64::from(self.page_number);
        let first = (page * size + 1).min(self.total_elements);
        let last = ((page + 1) * size).min(self.total_elements);
        format!("{first}–{last} of {}", self.total_elements)
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page_number + 1, self.total_pages)
    }

    /// 0-indexed page numbers for the numbered buttons: at most
    /// [`PAGE_WINDOW`], centred on the current page and clamped to the ends.
    pub fn page_window(&self) -> Vec<u32> {
        let total = self.total_pages;
        if total <= PAGE_WINDOW {
            return (0..total).collect();
        }

        let half = PAGE_WINDOW / 2;
        let start = if self.page_number <= half {
            0
        } else if self.page_number >= total - half - 1 {
            total - PAGE_WINDOW
        } else {
            self.page_number - half
        };

        (start..start + PAGE_WINDOW).collect()
    }
}
