use thiserror::Error;

/// Errors raised while validating a match state or running a prediction.
///
/// All variants are recoverable: the current request is abandoned and the
/// message is shown to the user.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Invalid team selection: {0}")]
    InvalidTeamSelection(String),

    #[error("Invalid {field}: {reason}")]
    InvalidRange { field: &'static str, reason: String },

    #[error("Model inference failed: {0}")]
    ModelInference(String),
}

impl PredictError {
    pub fn range(field: &'static str, reason: impl Into<String>) -> Self {
        PredictError::InvalidRange {
            field,
            reason: reason.into(),
        }
    }

    pub fn inference(message: impl Into<String>) -> Self {
        PredictError::ModelInference(message.into())
    }

    /// True for errors caused by user input rather than the model.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, PredictError::ModelInference(_))
    }
}

pub type Result<T> = std::result::Result<T, PredictError>;
