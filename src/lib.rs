//! Product catalog PDF generator.
//!
//! Takes a flat list of product records plus key-value configuration and
//! produces a paginated A4/A3/Letter catalog: optional cover page, products
//! grouped by category under styled titles, and cards laid out on a
//! configurable grid. Cards render either with a built-in layout or with
//! user-authored templates whose elements are rescaled from a reference
//! canvas onto each card.
//!
//! Entry points live in [`render::document`]: [`render::generate_catalog`],
//! [`render::generate_preview`] and
//! [`render::generate_multi_template_catalog`].

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use config::{CatalogSettings, ConfigStore, InMemoryConfigStore};
pub use error::{ConfigError, ImageError, RenderError};
pub use model::{organize, CategoryGroup, LayoutTemplate, ProductRecord, TemplateRegistry, ViewerClass};
pub use render::{
    generate_catalog, generate_multi_template_catalog, generate_preview, CatalogOutput,
    CatalogRenderer, FileImageSource, ImageSource, InMemoryImageSource,
};
