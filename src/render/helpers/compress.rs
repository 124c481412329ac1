//! PDF stream compression.
//!
//! printpdf writes uncompressed content streams; the finished document is
//! re-parsed with lopdf and its streams deflated before delivery.

use std::io::Cursor;

use crate::error::RenderError;

pub fn compress_pdf(uncompressed: Vec<u8>) -> Result<Vec<u8>, RenderError> {
    let mut doc = lopdf::Document::load_mem(&uncompressed)
        .map_err(|e| RenderError::PdfGeneration(format!("compression parse failed: {}", e)))?;

    doc.compress();

    let mut output = Cursor::new(Vec::new());
    doc.save_to(&mut output)
        .map_err(|e| RenderError::PdfGeneration(format!("compressed save failed: {}", e)))?;

    Ok(output.into_inner())
}
