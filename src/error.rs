use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration section '{section}': {message}")]
    InvalidSection { section: String, message: String },

    #[error("Invalid color specification: {0}")]
    InvalidColor(String),
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("PDF generation error: {0}")]
    PdfGeneration(String),

    #[error("Failed to embed image in document: {0}")]
    ImageEmbed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
