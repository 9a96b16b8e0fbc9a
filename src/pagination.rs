use serde::Serialize;

/// Number of page buttons shown at once.
pub const WINDOW: u32 = 5;

/// Up to [`WINDOW`] consecutive pages centred on `current`, clamped to
/// `1..=total` and widened at either edge.
pub fn page_window(current: u32, total: u32) -> Vec<u32> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let half = WINDOW / 2;
    let mut start = current.saturating_sub(half).max(1);
    let mut end = current.saturating_add(half).min(total);
    if end - start < WINDOW - 1 {
        if start == 1 {
            end = total.min(start + WINDOW - 1);
        }
        if end == total {
            start = end.saturating_sub(WINDOW - 1).max(1);
        }
    }
    (start..=end).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageButton {
    pub page: u32,
    pub current: bool,
}

/// First / previous / numbered / next / last controls. No state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub pages: Vec<PageButton>,
    pub first_disabled: bool,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub last_disabled: bool,
}

impl Pagination {
    /// `None` when there is nothing to paginate. A page past the end is
    /// treated as the last page.
    pub fn new(current_page: u32, total_pages: u32) -> Option<Pagination> {
        if total_pages <= 1 {
            return None;
        }
        let current_page = current_page.clamp(1, total_pages);
        let at_start = current_page <= 1;
        let at_end = current_page >= total_pages;
        Some(Pagination {
            current_page,
            total_pages,
            pages: page_window(current_page, total_pages)
                .into_iter()
                .map(|page| PageButton {
                    page,
                    current: page == current_page,
                })
                .collect(),
            first_disabled: at_start,
            prev_disabled: at_start,
            next_disabled: at_end,
            last_disabled: at_end,
        })
    }

    pub fn prev_page(&self) -> u32 {
        self.current_page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> u32 {
        self.current_page.saturating_add(1).min(self.total_pages)
    }
}

#[test]
fn test_page_window() {
    assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
    assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
    assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
    assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
    assert_eq!(page_window(9, 10), vec![6, 7, 8, 9, 10]);
    assert_eq!(page_window(2, 3), vec![1, 2, 3]);
    assert_eq!(page_window(1, 1), vec![1]);
    assert!(page_window(1, 0).is_empty());
    // out of range current pages are clamped
    assert_eq!(page_window(42, 10), vec![6, 7, 8, 9, 10]);
}

#[test]
fn test_pagination_controls() {
    assert!(Pagination::new(1, 1).is_none());
    assert!(Pagination::new(1, 0).is_none());

    let first = Pagination::new(1, 10).unwrap();
    assert!(first.first_disabled && first.prev_disabled);
    assert!(!first.next_disabled && !first.last_disabled);
    assert_eq!(first.next_page(), 2);
    assert!(first.pages[0].current);

    let last = Pagination::new(10, 10).unwrap();
    assert!(last.next_disabled && last.last_disabled);
    assert!(!last.prev_disabled);
    assert_eq!(last.prev_page(), 9);
    assert_eq!(last.next_page(), 10);
}

#[test]
fn test_page_past_the_end_is_clamped() {
    let huge = Pagination::new(u32::MAX, 3).unwrap();
    assert_eq!(huge.current_page, 3);
    assert_eq!(huge.next_page(), 3);
    assert_eq!(huge.prev_page(), 2);
    assert!(huge.next_disabled && huge.last_disabled);
    assert_eq!(
        huge.pages.iter().map(|b| b.page).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(huge.pages[2].current);

    assert_eq!(page_window(u32::MAX, u32::MAX).len(), 5);
}
