use models::views::VideoLessonDetails;
use serde::Serialize;
use utoipa::ToSchema;

/// Largest page a client may request
pub const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(per_page);
        Self {
            page,
            per_page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    /// Cuts one page out of an already filtered listing
    ///
    /// `page` is 1-based and both arguments are clamped to valid values.
    pub fn slice(all: Vec<T>, page: u64, per_page: u64) -> Self {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);
        let pagination = PaginationMeta::new(page, per_page, all.len() as u64);

        let skip = page.saturating_sub(1).saturating_mul(per_page);
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let items = all.into_iter().skip(skip).take(per_page as usize).collect();

        Self { items, pagination }
    }
}

/// One page of the joined video lesson listing
#[derive(Debug, Serialize, ToSchema)]
pub struct VideoLessonPage {
    pub videoaulas: Vec<VideoLessonDetails>,
    pub pagination: PaginationMeta,
}

impl From<Page<VideoLessonDetails>> for VideoLessonPage {
    fn from(page: Page<VideoLessonDetails>) -> Self {
        Self {
            videoaulas: page.items,
            pagination: page.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let page = Page::slice((1..=45).collect::<Vec<i32>>(), 2, 20);
        assert_eq!(page.items.first(), Some(&21));
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let page = Page::slice((1..=5).collect::<Vec<i32>>(), 0, 0);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.per_page, 1);
        assert_eq!(page.items, vec![1]);

        let past_end = Page::slice((1..=5).collect::<Vec<i32>>(), 9, 500);
        assert_eq!(past_end.pagination.per_page, MAX_PER_PAGE);
        assert!(past_end.items.is_empty());
        assert!(!past_end.pagination.has_next);
    }

    #[test]
    fn test_huge_page_number_yields_empty_page() {
        let page = Page::slice((1..=5).collect::<Vec<i32>>(), u64::MAX, 20);
        assert_eq!(page.pagination.page, u64::MAX);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
    }

    #[test]
    fn test_empty_listing() {
        let page = Page::slice(Vec::<i32>::new(), 1, 20);
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next);
        assert!(!page.pagination.has_prev);
    }
}
