//! PDF rendering: geometry, pagination, cards, cover and document assembly.

pub mod card;
pub mod cover;
pub mod document;
pub mod geometry;
pub mod helpers;
pub mod image;
pub mod mapper;
pub mod pagination;

pub use card::{resolve_content, CardRect, CardRenderer};
pub use document::{
    generate_catalog, generate_multi_template_catalog, generate_preview, CatalogKind,
    CatalogOutput, CatalogRenderer,
};
pub use geometry::PageGeometry;
pub use image::{crop_circular, FileImageSource, ImageSource, InMemoryImageSource, PhotoStroke};
pub use mapper::{map_element, MappedRect};
pub use pagination::{PageCursor, PaginationEngine, RenderSession};
