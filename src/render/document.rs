//! Document assembly: cover, category groups, save and compress.

use chrono::Local;
use log::{info, warn};
use printpdf::{PdfDocument, PdfPage, PdfSaveOptions};

use crate::config::CatalogSettings;
use crate::error::RenderError;
use crate::model::{organize, ProductRecord, TemplateRegistry, ViewerClass};

use super::cover::CoverRenderer;
use super::image::ImageSource;
use super::pagination::{PaginationEngine, RenderSession};

const DOCUMENT_TITLE: &str = "Catálogo de Produtos";

/// Which catalog variant a run produces; decides the output filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Full,
    Preview,
    MultiTemplate,
}

impl CatalogKind {
    /// Date-stamped download filename, e.g. `catalogo-produtos-2026-08-30.pdf`
    pub fn output_filename(self) -> String {
        let prefix = match self {
            CatalogKind::Full => "catalogo-produtos",
            CatalogKind::Preview => "preview",
            CatalogKind::MultiTemplate => "catalogo-multiplos-templates",
        };
        format!("{}-{}.pdf", prefix, Local::now().format("%Y-%m-%d"))
    }
}

/// A finished catalog: the PDF bytes plus the filename it should ship under.
#[derive(Debug, Clone)]
pub struct CatalogOutput {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Top-level renderer: turns a product list and settings into PDF bytes.
pub struct CatalogRenderer {
    settings: CatalogSettings,
}

impl CatalogRenderer {
    pub fn new(settings: CatalogSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Full catalog: optional cover page, then every category in order,
    /// all cards using the single configured template (or the default card).
    pub async fn render(
        &self,
        products: Vec<ProductRecord>,
        viewer: ViewerClass,
        images: &dyn ImageSource,
    ) -> Result<Vec<u8>, RenderError> {
        let mut doc = PdfDocument::new(DOCUMENT_TITLE);
        let engine = PaginationEngine::new(&self.settings);
        let mut session =
            RenderSession::new(&mut doc, engine.geometry(), self.settings.page.margin_top);

        if let Some(cover) = &self.settings.cover {
            CoverRenderer::render(&mut session, cover, images).await?;
            session.start_new_page();
        }

        let template = self.settings.template.as_ref();
        let groups = organize(products);
        info!("rendering {} categories", groups.len());
        for group in &groups {
            engine
                .render_group(&mut session, group, template, viewer, images)
                .await?;
        }

        let pages = session.finish();
        save(doc, pages)
    }

    /// Preview: no cover, and only as many products as fit on one page grid.
    /// Categories still organize and paginate normally, so a preview spanning
    /// several categories can still run past one page.
    pub async fn render_preview(
        &self,
        mut products: Vec<ProductRecord>,
        viewer: ViewerClass,
        images: &dyn ImageSource,
    ) -> Result<Vec<u8>, RenderError> {
        let capacity = self.settings.grid.capacity() as usize;
        products.truncate(capacity);

        let mut doc = PdfDocument::new(DOCUMENT_TITLE);
        let engine = PaginationEngine::new(&self.settings);
        let mut session =
            RenderSession::new(&mut doc, engine.geometry(), self.settings.page.margin_top);

        let template = self.settings.template.as_ref();
        for group in &organize(products) {
            engine
                .render_group(&mut session, group, template, viewer, images)
                .await?;
        }

        let pages = session.finish();
        save(doc, pages)
    }

    /// Multi-template catalog: each category renders with its assigned
    /// template; categories with no assignment are left out entirely.
    pub async fn render_multi_template(
        &self,
        products: Vec<ProductRecord>,
        viewer: ViewerClass,
        images: &dyn ImageSource,
        registry: &TemplateRegistry,
    ) -> Result<Vec<u8>, RenderError> {
        let mut doc = PdfDocument::new(DOCUMENT_TITLE);
        let engine = PaginationEngine::new(&self.settings);
        let mut session =
            RenderSession::new(&mut doc, engine.geometry(), self.settings.page.margin_top);

        if let Some(cover) = &self.settings.cover {
            CoverRenderer::render(&mut session, cover, images).await?;
            session.start_new_page();
        }

        for group in &organize(products) {
            match registry.for_category(&group.category_name) {
                Some(template) => {
                    engine
                        .render_group(&mut session, group, Some(template), viewer, images)
                        .await?;
                }
                None => {
                    warn!(
                        "category '{}' has no template assigned, skipped",
                        group.category_name
                    );
                }
            }
        }

        let pages = session.finish();
        save(doc, pages)
    }
}

fn save(mut doc: PdfDocument, pages: Vec<PdfPage>) -> Result<Vec<u8>, RenderError> {
    doc.pages = pages;
    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for warning in &warnings {
        warn!("pdf writer: {:?}", warning);
    }
    super::helpers::compress_pdf(bytes)
}

/// Render a full catalog and pair it with its download filename.
pub async fn generate_catalog(
    settings: CatalogSettings,
    products: Vec<ProductRecord>,
    viewer: ViewerClass,
    images: &dyn ImageSource,
) -> Result<CatalogOutput, RenderError> {
    let bytes = CatalogRenderer::new(settings).render(products, viewer, images).await?;
    Ok(CatalogOutput {
        filename: CatalogKind::Full.output_filename(),
        bytes,
    })
}

/// Render a single-page preview and pair it with its download filename.
pub async fn generate_preview(
    settings: CatalogSettings,
    products: Vec<ProductRecord>,
    viewer: ViewerClass,
    images: &dyn ImageSource,
) -> Result<CatalogOutput, RenderError> {
    let bytes = CatalogRenderer::new(settings)
        .render_preview(products, viewer, images)
        .await?;
    Ok(CatalogOutput {
        filename: CatalogKind::Preview.output_filename(),
        bytes,
    })
}

/// Render a per-category-template catalog and pair it with its filename.
pub async fn generate_multi_template_catalog(
    settings: CatalogSettings,
    products: Vec<ProductRecord>,
    viewer: ViewerClass,
    images: &dyn ImageSource,
    registry: &TemplateRegistry,
) -> Result<CatalogOutput, RenderError> {
    let bytes = CatalogRenderer::new(settings)
        .render_multi_template(products, viewer, images, registry)
        .await?;
    Ok(CatalogOutput {
        filename: CatalogKind::MultiTemplate.output_filename(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_carry_kind_prefix_and_date() {
        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(
            CatalogKind::Full.output_filename(),
            format!("catalogo-produtos-{}.pdf", today)
        );
        assert_eq!(
            CatalogKind::Preview.output_filename(),
            format!("preview-{}.pdf", today)
        );
        assert_eq!(
            CatalogKind::MultiTemplate.output_filename(),
            format!("catalogo-multiplos-templates-{}.pdf", today)
        );
    }
}
