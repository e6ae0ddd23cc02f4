//! Error handling for the trackplot CLI

use std::path::PathBuf;
use thiserror::Error;
use trackplot_core::TrackplotError;

/// User-facing error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Shape error: {message}")]
    Shape { message: String },

    #[error("Rendering error: {message}")]
    Rendering { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn parse<F: Into<String>, M: Into<String>>(file: F, message: M) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn shape<S: Into<String>>(message: S) -> Self {
        Self::Shape { message: message.into() }
    }

    pub fn rendering<S: Into<String>>(message: S) -> Self {
        Self::Rendering { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }
}

impl From<TrackplotError> for CliError {
    fn from(err: TrackplotError) -> Self {
        match err {
            TrackplotError::Configuration { message } => Self::config(message),
            err @ TrackplotError::ShapePrecondition { .. } => Self::shape(err.to_string()),
            TrackplotError::Resource { message } => Self::rendering(message),
            TrackplotError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
                Self::file_not_found(path)
            }
            err @ TrackplotError::Io { .. } => Self::io(err.to_string()),
            TrackplotError::Parse { file, message } => Self::parse(file, message),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Relative GFF3 paths are resolved against the figure file's directory",
                path.display()
            ));
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Use 'trackplot example' to print a sample figure description\n\
                 • Check that display_start is smaller than display_stop\n\
                 • Glyph names are listed by 'trackplot glyphs'",
            );
        }

        CliError::Shape { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Triangle tracks only accept point features (start == stop)\n\
                 • Use a rectangle glyph for features with a length",
            );
        }

        CliError::Rendering { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Raise layout.huge_height for figures with many feature rows\n\
                 • Narrow the display window with --start/--stop",
            );
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}
