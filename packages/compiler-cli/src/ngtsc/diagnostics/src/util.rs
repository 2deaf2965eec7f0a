use super::error_code::ErrorCode;
use once_cell::sync::Lazy;
use regex::Regex;

static ERROR_CODE_MATCHER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\u{001b}\[\d+m ?)TS-99(\d+: ?\u{001b}\[\d+m)").unwrap());

/// During formatting of diagnostics, the numeric code of each diagnostic is
/// prefixed with the hard-coded "TS" prefix. For Angular's own error codes,
/// a prefix of "NG" is desirable. To achieve this, all Angular error codes
/// start with "-99" so that the sequence "TS-99" can be assumed to
/// correspond with an Angular specific error code. This function replaces
/// those occurrences with just "NG".
pub fn replace_ts_with_ng_in_errors(errors: &str) -> String {
    ERROR_CODE_MATCHER
        .replace_all(errors, "${1}NG${2}")
        .to_string()
}

/// Maps an `ErrorCode` into the negative `-99xxxx` namespace so framework
/// codes never collide with host-language diagnostic codes.
pub fn ng_error_code(code: ErrorCode) -> i32 {
    let code_val = code as i32;
    format!("-99{}", code_val).parse::<i32>().unwrap()
}
