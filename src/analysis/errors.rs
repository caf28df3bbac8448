/// Failures the analysis engine distinguishes.
///
/// `Transport` and `Parse` are absorbed by the components and turned into a
/// degraded result. Only `Validation` is handed back to callers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("fetch failed: {reason}")]
    Transport { reason: String },

    #[error("unparseable page: {reason}")]
    Parse { reason: String },

    #[error("invalid url: {message}")]
    Validation { message: String },
}

impl AnalysisError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Transport and parse failures degrade a result instead of failing it.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Validation { .. })
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(crate::fetch::describe_reqwest_error(&err))
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
