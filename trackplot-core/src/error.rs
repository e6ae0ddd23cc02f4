//! Error handling for trackplot

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for layout, rendering and output
#[derive(Error, Debug)]
pub enum TrackplotError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Shape precondition failed for {glyph} glyph on feature '{feature}': {message}")]
    ShapePrecondition {
        glyph: String,
        feature: String,
        message: String,
    },

    #[error("Resource error: {message}")]
    Resource { message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },
}

impl TrackplotError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn shape_precondition<G: Into<String>, F: Into<String>, M: Into<String>>(
        glyph: G,
        feature: F,
        message: M,
    ) -> Self {
        Self::ShapePrecondition {
            glyph: glyph.into(),
            feature: feature.into(),
            message: message.into(),
        }
    }

    pub fn resource<S: Into<String>>(message: S) -> Self {
        Self::Resource { message: message.into() }
    }

    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse<F: Into<String>, M: Into<String>>(file: F, message: M) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl From<image::ImageError> for TrackplotError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(source) => Self::Io {
                path: PathBuf::new(),
                source,
            },
            other => Self::resource(format!("image encoding failed: {}", other)),
        }
    }
}

/// Result type for trackplot operations
pub type Result<T> = std::result::Result<T, TrackplotError>;
