use std::fmt;

// === SettingsError ===

/// Errors related to the persisted key-value settings store.
#[derive(Debug)]
pub enum SettingsError {
    /// The store could not be read or its content is not a JSON object.
    Read(String),
    /// The store could not be written back to disk.
    Write(String),
    /// A settings value could not be encoded.
    Serialization(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Read(msg) => write!(f, "Settings read failed: {}", msg),
            SettingsError::Write(msg) => write!(f, "Settings write failed: {}", msg),
            SettingsError::Serialization(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === SyncError ===

/// Errors that end a single bookmark sync attempt.
///
/// None of these are retried; the caller decides whether to report or log.
#[derive(Debug)]
pub enum SyncError {
    /// A bookmark node could not be converted into a record.
    Traversal(String),
    /// The host could not deliver its bookmark tree.
    Host(String),
    /// The upload payload could not be encoded.
    Encode(String),
    /// No response was obtained (connection, DNS, TLS or timeout failure).
    Transport(String),
    /// The collector answered with a non-success status.
    HttpStatus { status: u16, body: String },
    /// The collector answered with a success status but a non-JSON body.
    ResponseParse(String),
    /// Metadata settings could not be read before syncing.
    Settings(SettingsError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Traversal(msg) => write!(f, "Bookmark traversal failed: {}", msg),
            SyncError::Host(msg) => write!(f, "Bookmark tree unavailable: {}", msg),
            SyncError::Encode(msg) => write!(f, "Payload encoding failed: {}", msg),
            SyncError::Transport(msg) => write!(f, "Transport error: {}", msg),
            SyncError::HttpStatus { status, body } => write!(f, "HTTP {}: {}", status, body),
            SyncError::ResponseParse(msg) => write!(f, "Invalid collector response: {}", msg),
            SyncError::Settings(e) => write!(f, "{}", e),
        }
    }
}

// Settings renders its inner error directly.
impl std::error::Error for SyncError {}

impl From<SettingsError> for SyncError {
    fn from(error: SettingsError) -> Self {
        SyncError::Settings(error)
    }
}

// === ConfigError ===

/// Errors raised while loading the agent configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(String),
    /// The configuration file is not valid JSON for `AgentConfig`.
    Parse(String),
    /// No bearer credential was supplied by the file or the environment.
    MissingToken,
    /// A field holds a value outside its allowed range.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Config read failed: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Config parse failed: {}", msg),
            ConfigError::MissingToken => write!(
                f,
                "Missing API token: set api_token in the config file or UNIBROWSER_API_TOKEN"
            ),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Joins an error with its whole `source()` chain, outermost first.
pub fn unpack_error(err: &(dyn std::error::Error)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
