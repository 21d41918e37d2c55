//! Error types shared by the prism tools

use thiserror::Error;

use crate::palette::PaletteId;

/// Result type alias for prism operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// How a failure should be presented to the user.
///
/// Every variant is recovered at the point of the user action; none of them
/// ends the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user handed us something we cannot work with
    InputRejected,
    /// Decoding, encoding or lookup failed while running the tool
    ProcessingFailure,
    /// The platform refused access (clipboard, camera)
    EnvironmentDenial,
}

#[derive(Error, Debug)]
pub enum ToolError {
    /// Input was not acceptable for the requested tool
    #[error("Input rejected: {reason}")]
    InputRejected { reason: String },

    /// Image file could not be read or decoded
    #[error("Failed to load image: {message}")]
    ImageLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image could not be encoded for output
    #[error("Failed to encode image: {message}")]
    ImageEncode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A hex string that does not describe a color
    #[error("Invalid color: {input}")]
    InvalidColor { input: String },

    /// Palette must hold between one and eight colors
    #[error("Palette must contain 1 to {max} colors, got {count}")]
    PaletteSize { count: usize, max: usize },

    #[error("No palette with id {0}")]
    PaletteNotFound(PaletteId),

    #[error("Palette {id} has no color at index {index}")]
    ColorIndexOutOfRange { id: PaletteId, index: usize },

    /// Configuration value outside its accepted range
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// The scanned image holds no decodable QR code
    #[error("No QR code found: {message}")]
    QrNotFound { message: String },

    /// Clipboard access refused or unavailable
    #[error("Clipboard unavailable: {message}")]
    ClipboardDenied { message: String },

    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic processing error
    #[error("Processing error: {0}")]
    Processing(String),
}

impl ToolError {
    pub fn input_rejected(reason: impl Into<String>) -> Self {
        Self::InputRejected {
            reason: reason.into(),
        }
    }

    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image encode error with context
    pub fn image_encode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageEncode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Classify the error for presentation
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::InputRejected { .. }
            | ToolError::InvalidParameter { .. }
            | ToolError::InvalidColor { .. } => ErrorKind::InputRejected,
            ToolError::ClipboardDenied { .. } => ErrorKind::EnvironmentDenial,
            _ => ErrorKind::ProcessingFailure,
        }
    }

    /// Get a user-friendly description for display in a notification
    pub fn user_message(&self) -> String {
        match self {
            ToolError::InputRejected { reason } => reason.clone(),
            ToolError::ImageLoad { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            ToolError::ImageEncode { .. } => "Could not write the processed image.".to_string(),
            ToolError::InvalidColor { input } => format!("'{}' is not a valid hex color", input),
            ToolError::PaletteSize { .. } => "No usable colors were found.".to_string(),
            ToolError::PaletteNotFound(id) => format!("Palette {} does not exist", id),
            ToolError::ColorIndexOutOfRange { id, index } => {
                format!("Palette {} has no color #{}", id, index)
            }
            ToolError::InvalidParameter { parameter, value } => {
                format!("Invalid value for {}: {}", parameter, value)
            }
            ToolError::QrNotFound { .. } => "No QR code found in the image.".to_string(),
            ToolError::ClipboardDenied { .. } => {
                "Clipboard access was denied. Copy the value manually instead.".to_string()
            }
            ToolError::Io { message, .. } => message.clone(),
            _ => "The operation failed. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ToolError::input_rejected("notes.txt is not an image file").kind(),
            ErrorKind::InputRejected
        );
        assert_eq!(
            ToolError::ClipboardDenied {
                message: "no display".into()
            }
            .kind(),
            ErrorKind::EnvironmentDenial
        );
        assert_eq!(
            ToolError::PaletteNotFound(PaletteId(3)).kind(),
            ErrorKind::ProcessingFailure
        );
        assert_eq!(
            ToolError::QrNotFound {
                message: "no finder patterns".into()
            }
            .kind(),
            ErrorKind::ProcessingFailure
        );
    }

    #[test]
    fn test_user_message_passes_rejection_reason_through() {
        let err = ToolError::input_rejected("notes.txt is not an image file");
        assert_eq!(err.user_message(), "notes.txt is not an image file");
    }

    #[test]
    fn test_image_load_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ToolError::image_load("Failed to open photo.png", io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Failed to load image: Failed to open photo.png");
    }
}
