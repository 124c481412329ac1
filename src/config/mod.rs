//! Configuration model: typed settings sections with defaults, loaded once
//! per run from a key-value store.

pub mod defaults;
pub mod settings;
pub mod store;

pub use settings::{
    load_template_registry, CatalogSettings, CategoryTitleStyle, CoverAnchor, CoverSpec,
    CoverText, FontFamily, GridSpec, Orientation, PageSpec, PaperSize,
};
pub use store::{ConfigStore, InMemoryConfigStore};
