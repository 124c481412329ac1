pub mod category;
pub mod product;
pub mod template;

pub use category::{organize, CategoryGroup};
pub use product::{ProductRecord, ViewerClass};
pub use template::{
    ContentBinding, ContentKind, ElementSpec, FontWeight, HAlign, LayoutTemplate, TemplateRegistry,
};
