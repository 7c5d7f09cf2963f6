use crate::catalog::pagination::{build_page_list, paginate, total_pages, PageLink};
use crate::catalog::recipe::Recipe;
use crate::catalog::search::{normalize_query, FuzzySearch, Match, MatchedField};
use crate::catalog::store::RecipeStore;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogState {
    /// No query has been applied yet
    Idle,
    /// A query is being evaluated
    Searching,
    /// A result set is available (possibly empty)
    Displaying,
}

/// Drives one catalog session: store → search → paginate.
///
/// The controller owns only transient state (query, result, current page);
/// the store and engine are shared read-only.
#[derive(Debug)]
pub struct CatalogController<'s> {
    store: &'s RecipeStore,
    engine: &'s FuzzySearch,
    page_size: usize,
    state: CatalogState,
    query: String,
    results: Vec<Match>,
    current_page: usize,
}

/// One recipe on the current page together with how it matched.
#[derive(Debug, Clone)]
pub struct CatalogEntry<'s> {
    pub recipe: &'s Recipe,
    pub distance: f64,
    pub field: Option<MatchedField>,
}

/// Everything the presentation layer needs to render the catalog.
#[derive(Debug, Clone)]
pub struct CatalogView<'s> {
    pub query: String,
    pub page_items: Vec<CatalogEntry<'s>>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub page_numbers: Vec<PageLink>,
    pub start_index: usize,
    pub end_index: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<'s> CatalogController<'s> {
    pub fn new(store: &'s RecipeStore, engine: &'s FuzzySearch, page_size: usize) -> Self {
        Self {
            store,
            engine,
            page_size: page_size.max(1),
            state: CatalogState::Idle,
            query: String::new(),
            results: Vec::new(),
            current_page: 1,
        }
    }

    /// Run a query and show its first page.
    pub fn browse(
        store: &'s RecipeStore,
        engine: &'s FuzzySearch,
        page_size: usize,
        query: &str,
        page: Option<usize>,
    ) -> CatalogView<'s> {
        let mut controller = Self::new(store, engine, page_size);
        controller.set_query(query);
        if let Some(page) = page {
            controller.set_page(page);
        }
        controller.view()
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_results(&self) -> usize {
        self.results.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.results.len(), self.page_size)
    }

    /// Re-run search against the full store and go back to page 1.
    pub fn set_query(&mut self, raw: &str) {
        self.state = CatalogState::Searching;
        self.query = normalize_query(raw);
        self.results = self.engine.rank(&self.query, self.store.records());
        self.current_page = 1;
        self.state = CatalogState::Displaying;

        debug!(
            "Catalog query '{}' -> {} results",
            self.query,
            self.results.len()
        );
    }

    /// Move to another page of the current result, clamped into range.
    ///
    /// The search is not re-run. Called before any query, it shows the
    /// unfiltered catalog first.
    pub fn set_page(&mut self, page: usize) {
        if self.state == CatalogState::Idle {
            self.set_query("");
        }
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn view(&self) -> CatalogView<'s> {
        let records = self.store.records();
        let page = paginate(&self.results, self.current_page, self.page_size);
        let total_pages = page.total_pages;

        let page_items = page
            .items
            .iter()
            .map(|m| CatalogEntry {
                recipe: &records[m.index],
                distance: m.distance,
                field: m.field,
            })
            .collect();

        CatalogView {
            query: self.query.clone(),
            page_items,
            current_page: self.current_page,
            total_pages,
            total_results: self.results.len(),
            page_numbers: build_page_list(self.current_page, total_pages),
            start_index: page.start_index,
            end_index: page.end_index,
            has_previous: self.current_page > 1,
            has_next: self.current_page < total_pages,
        }
    }
}

impl CatalogView<'_> {
    pub fn is_empty(&self) -> bool {
        self.total_results == 0
    }

    pub fn recipes(&self) -> Vec<&Recipe> {
        self.page_items.iter().map(|entry| entry.recipe).collect()
    }
}
