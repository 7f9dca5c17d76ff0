use thiserror::Error;

/// Main error type for pax2kgml
#[derive(Error, Debug)]
pub enum Pax2KgmlError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON snapshot (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An element shape the classifier has no rule for.
    ///
    /// Aborts the whole run: an unhandled BioPAX class means the mapping
    /// table does not cover a format extension, not that the data is bad.
    #[error("Unhandled BioPAX element '{id}' of class {class}")]
    UnhandledElement { id: String, class: String },

    /// A reference into the model arena that points at nothing
    #[error("Dangling element reference: {0}")]
    DanglingReference(String),
}

/// Convenient Result type using Pax2KgmlError
pub type Result<T> = std::result::Result<T, Pax2KgmlError>;
