use thiserror::Error;

#[derive(Error, Debug)]
pub enum VsError {
    #[error("Failed to fetch {anime} characters: HTTP {status}")]
    FetchError { anime: String, status: u16 },

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected response shape for {anime}: {message}")]
    ParseError { anime: String, message: String },

    #[error("No characters found for {anime}")]
    EmptyResultError { anime: String },

    #[error("Could not produce a distinct matchup after {attempts} attempts")]
    MatchupExhaustedError { attempts: u32 },

    #[error("Invalid character {field}: {reason}")]
    InvalidCharacter { field: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Selection,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VsError::FetchError { .. } | VsError::Request(_) => ErrorCategory::Network,
            VsError::ParseError { .. }
            | VsError::EmptyResultError { .. }
            | VsError::InvalidCharacter { .. } => ErrorCategory::Data,
            VsError::MatchupExhaustedError { .. } => ErrorCategory::Selection,
            VsError::ConfigError { .. } | VsError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            VsError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Selection => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 使用者可重新觸發的錯誤（重試或清除快取後重試）
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VsError::FetchError { .. }
                | VsError::Request(_)
                | VsError::EmptyResultError { .. }
                | VsError::MatchupExhaustedError { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            VsError::FetchError { status, .. } if *status == 429 => {
                "The character API is rate limiting requests; wait a moment and retry"
            }
            VsError::FetchError { .. } | VsError::Request(_) => {
                "Check your network connection and retry"
            }
            VsError::ParseError { .. } => "The character API changed its format; check the api_url entries",
            VsError::EmptyResultError { .. } => {
                "Disable main_only or raise character_limit to widen the pool"
            }
            VsError::MatchupExhaustedError { .. } => {
                "Clear the recent-character cache and retry"
            }
            VsError::InvalidCharacter { .. } => "Report the malformed record upstream",
            VsError::ConfigError { .. } | VsError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            VsError::Io(_) => "Check file permissions and paths",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            VsError::FetchError { anime, .. } | VsError::ParseError { anime, .. } => {
                format!("Could not load characters for {}", anime)
            }
            VsError::Request(_) => "Could not reach the character API".to_string(),
            VsError::EmptyResultError { anime } => {
                format!("{} has no characters to battle right now", anime)
            }
            VsError::MatchupExhaustedError { .. } => {
                "Could not find two different fighters".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VsError>;
