use once_cell::sync::Lazy;
use regex::Regex;

static TS_DTS_JS_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.d\.ts$|\.ts$|\.js$").unwrap());

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Remove a .ts, .d.ts, or .js extension from a file name.
pub fn strip_extension(path: &str) -> String {
    TS_DTS_JS_EXTENSION.replace(path, "").to_string()
}
