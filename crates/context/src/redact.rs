//! Credential masking for text leaving the process

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Replacement for masked values
pub const REDACTED: &str = "[REDACTED]";

static BEARER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(bearer)\s+([A-Za-z0-9\-._~+/]+=*)").expect("valid bearer pattern")
});

static BASIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(basic)\s+([A-Za-z0-9+/]{8,}=*)").expect("valid basic pattern")
});

static URL_CREDENTIALS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b([a-z][a-z0-9+.-]*://)[^/\s:@]+:[^/\s@]+@").expect("valid userinfo pattern")
});

// A bare `key: value` is prose; only `=` or a quoted value counts as an assignment.
static ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(api[_-]?key|access[_-]?token|token|secret|password)(["']?\s*(?:=\s*["']?|:\s*["']))[^\s"'&,;]+"#,
    )
    .expect("valid assignment pattern")
});

/// Minimum length at which an all-letter word is treated as a credential
const MIN_OPAQUE_LEN: usize = 16;

/// Whether a scheme argument looks like a credential rather than a word
fn looks_like_credential(value: &str) -> bool {
    value.len() >= MIN_OPAQUE_LEN
        || value.ends_with('=')
        || value.chars().any(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '_' | '+' | '/'))
}

fn mask_scheme(pattern: &Regex, text: &str) -> String {
    pattern
        .replace_all(text, |caps: &Captures| {
            let value = caps[2].trim_end_matches(['.', '-']);
            if looks_like_credential(value) {
                format!("{} {}", &caps[1], REDACTED)
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Mask bearer tokens, basic-auth credentials and secret-looking assignments
///
/// Matching is pattern based; values that do not look like one of these
/// forms are left alone, so prose such as "returns a bearer token" or
/// "Reset password: sends an email" passes through unchanged.
pub fn redact_secrets(text: &str) -> String {
    let text = mask_scheme(&BEARER, text);
    let text = mask_scheme(&BASIC, &text);
    let text = URL_CREDENTIALS.replace_all(&text, format!("${{1}}{}@", REDACTED));
    ASSIGNMENT
        .replace_all(&text, format!("${{1}}${{2}}{}", REDACTED))
        .into_owned()
}
