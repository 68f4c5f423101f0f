use hopframe_core::ConfigError;

#[derive(Debug)]
pub enum ReplayError {
    Io { path: String, message: String },
    Parse(String),
    Config(ConfigError),
    InvalidClock(String),
    InvalidScript(String),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::Parse(e) => write!(f, "replay parse error: {e}"),
            Self::Config(e) => write!(f, "invalid motion config: {e}"),
            Self::InvalidClock(m) => write!(f, "invalid clock: {m}"),
            Self::InvalidScript(m) => write!(f, "invalid script: {m}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ReplayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
