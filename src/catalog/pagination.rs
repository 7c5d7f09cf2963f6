use serde::{Serialize, Serializer};

/// Pages shown on each side of the current page in the page list.
pub const PAGE_WINDOW: usize = 2;

/// A slice of an ordered result list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub total_pages: usize,
    /// Zero-based index of the first item on this page
    pub start_index: usize,
    /// Exclusive end index, `min(start_index + page_size, len)`
    pub end_index: usize,
}

/// Number of pages needed for `len` items; never less than 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// Slice `items` for a 1-based `page`.
///
/// The page is not clamped: a page past the end yields an empty slice
/// rather than an error. Page 0 is treated as page 1.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let start_index = page.saturating_sub(1).saturating_mul(page_size);
    let end_index = start_index.saturating_add(page_size).min(items.len());

    let page_items = if start_index >= items.len() {
        &items[..0]
    } else {
        &items[start_index..end_index]
    };

    Page {
        items: page_items,
        total_pages: total_pages(items.len(), page_size),
        start_index,
        end_index,
    }
}

/// Entry of the compact page-number list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Page(number) => serializer.serialize_u64(*number as u64),
            PageLink::Ellipsis => serializer.serialize_str("ellipsis"),
        }
    }
}

/// Build the page list shown under the catalog, e.g.
/// `1 … 3 4 5 6 7 … 10` for page 5 of 10.
///
/// `total` must be at least 1.
pub fn build_page_list(current: usize, total: usize) -> Vec<PageLink> {
    let mut pages = vec![PageLink::Page(1)];

    if current > PAGE_WINDOW + 2 {
        pages.push(PageLink::Ellipsis);
    }

    let first = current.saturating_sub(PAGE_WINDOW).max(2);
    let last = total
        .saturating_sub(1)
        .min(current.saturating_add(PAGE_WINDOW));
    pages.extend((first..=last).map(PageLink::Page));

    if current.saturating_add(PAGE_WINDOW) < total.saturating_sub(1) {
        pages.push(PageLink::Ellipsis);
    }
    if total > 1 {
        pages.push(PageLink::Page(total));
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageLink::{Ellipsis, Page as P};

    #[test]
    fn test_paginate_full_and_partial_pages() {
        let items: Vec<u32> = (0..20).collect();

        let page = paginate(&items, 1, 8);
        assert_eq!(page.items, &items[0..8]);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.start_index, page.end_index), (0, 8));

        let page = paginate(&items, 3, 8);
        assert_eq!(page.items, &items[16..20]);
        assert_eq!((page.start_index, page.end_index), (16, 20));
    }

    #[test]
    fn test_paginate_out_of_range_page_is_empty() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, 3, 8);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.start_index, 16);

        let page = paginate(&items, usize::MAX, 8);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_paginate_empty_list_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let page = paginate(&items, 1, 8);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_pages_reconstruct_list() {
        for len in [0usize, 1, 7, 8, 9, 16, 23] {
            let items: Vec<usize> = (0..len).collect();
            let total = total_pages(len, 8);
            let mut rebuilt = Vec::new();
            for p in 1..=total {
                let page = paginate(&items, p, 8);
                assert!(page.items.len() <= 8);
                if p < total {
                    assert_eq!(page.items.len(), 8);
                }
                rebuilt.extend_from_slice(page.items);
            }
            assert_eq!(rebuilt, items);
        }
    }

    #[test]
    fn test_page_list_middle() {
        assert_eq!(
            build_page_list(5, 10),
            vec![P(1), Ellipsis, P(3), P(4), P(5), P(6), P(7), Ellipsis, P(10)]
        );
    }

    #[test]
    fn test_page_list_single_page() {
        assert_eq!(build_page_list(1, 1), vec![P(1)]);
    }

    #[test]
    fn test_page_list_edges() {
        assert_eq!(build_page_list(1, 3), vec![P(1), P(2), P(3)]);
        assert_eq!(
            build_page_list(1, 10),
            vec![P(1), P(2), P(3), Ellipsis, P(10)]
        );
        assert_eq!(
            build_page_list(10, 10),
            vec![P(1), Ellipsis, P(8), P(9), P(10)]
        );
        // gap of exactly one page number is shown, not collapsed
        assert_eq!(
            build_page_list(4, 7),
            vec![P(1), P(2), P(3), P(4), P(5), P(6), P(7)]
        );
    }

    #[test]
    fn test_page_list_strictly_ascending() {
        for total in 1..=15 {
            for current in 1..=total {
                let numbers: Vec<usize> = build_page_list(current, total)
                    .into_iter()
                    .filter_map(|link| match link {
                        P(n) => Some(n),
                        Ellipsis => None,
                    })
                    .collect();
                assert!(numbers.windows(2).all(|w| w[0] < w[1]));
                assert_eq!(numbers.first(), Some(&1));
                assert_eq!(numbers.last(), Some(&total));
            }
        }
    }

    #[test]
    fn test_page_link_serialization() {
        let json = serde_json::to_string(&build_page_list(5, 10)).unwrap();
        assert_eq!(json, r#"[1,"ellipsis",3,4,5,6,7,"ellipsis",10]"#);
    }
}
