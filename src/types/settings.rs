use serde_json::{Map, Value};

/// Raw key-value view of the persisted settings store.
pub type SettingsMap = Map<String, Value>;

pub const AUTO_SYNC_ENABLED: &str = "auto_sync_enabled";
pub const AUTO_SYNC_INTERVAL: &str = "auto_sync_interval";
pub const BROWSER_NAME: &str = "browser_name";
pub const DEVICE_NAME: &str = "device_name";
pub const PROFILE_NAME: &str = "profile_name";

pub const AUTO_SYNC_KEYS: [&str; 2] = [AUTO_SYNC_ENABLED, AUTO_SYNC_INTERVAL];
pub const METADATA_KEYS: [&str; 3] = [BROWSER_NAME, DEVICE_NAME, PROFILE_NAME];

pub const DEFAULT_INTERVAL_MINUTES: u64 = 15;

/// Effective auto-sync configuration after sanitizing the stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoSyncSettings {
    pub enabled: bool,
    /// Always greater than zero.
    pub interval_minutes: u64,
}

impl AutoSyncSettings {
    /// Sanitizes stored values: absent `auto_sync_enabled` means off, and any
    /// interval that does not parse to a positive integer becomes `default_interval`.
    pub fn from_settings(settings: &SettingsMap, default_interval: u64) -> Self {
        let enabled = settings.get(AUTO_SYNC_ENABLED).is_some_and(is_truthy);
        let interval_minutes = settings
            .get(AUTO_SYNC_INTERVAL)
            .and_then(parse_int)
            .filter(|n| *n > 0)
            .map(|n| n as u64)
            .unwrap_or(default_interval);
        Self {
            enabled,
            interval_minutes,
        }
    }
}

/// Script-style truthiness of a stored value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Base-10 integer parse of a stored value's string form.
///
/// Leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit, and fractional numbers truncate. Returns `None` when no
/// digit leads the value.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            if let Some(u) = n.as_u64() {
                return Some(i64::try_from(u).unwrap_or(i64::MAX));
            }
            n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)
        }
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
