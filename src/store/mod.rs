pub mod catalog_cache;
pub mod preferences;
pub mod storage;

pub use catalog_cache::{CachedCatalog, CatalogCache};
pub use preferences::PreferenceStore;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageKey};
