pub mod catalog;
pub mod fallback;
pub mod providers;
pub mod queries;
pub mod stats;

pub use catalog::CatalogAdapter;
pub use providers::{CatalogSource, TvMazeProvider};
pub use queries::CatalogService;
pub use stats::{ExportDocument, PreferenceStats};
