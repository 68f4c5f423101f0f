/// Rejected motion configuration.
///
/// Raised once at construction time. Ticks never fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field that must be strictly positive was zero or negative.
    NonPositive { field: &'static str, value: f32 },
    /// A field was NaN or infinite.
    NonFinite { field: &'static str },
    /// The grounded snap velocity pointed upward.
    PositiveSnap(f32),
    /// An animation parameter identifier was empty.
    EmptyParameterName(&'static str),
    /// The config file could not be read.
    Io { path: String, message: String },
    /// The TOML source could not be parsed.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be > 0, got {value}")
            },
            Self::NonFinite { field } => write!(f, "{field} must be finite"),
            Self::PositiveSnap(v) => {
                write!(f, "grounded_snap_velocity_y must be <= 0, got {v}")
            },
            Self::EmptyParameterName(slot) => {
                write!(f, "animation parameter name for {slot} is empty")
            },
            Self::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
