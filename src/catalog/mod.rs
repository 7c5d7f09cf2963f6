// Recipe catalog: dataset store, fuzzy search, pagination and the
// controller that ties them together for one browsing session

pub mod controller;
pub mod pagination;
pub mod recipe;
pub mod search;
pub mod store;

// Re-exports
pub use controller::{CatalogController, CatalogEntry, CatalogState, CatalogView};
pub use pagination::{build_page_list, paginate, Page, PageLink};
pub use recipe::Recipe;
pub use search::{normalize_query, FuzzySearch, Match, MatchedField};
pub use store::{LoadReport, RecipeStore, RejectedRecord};
