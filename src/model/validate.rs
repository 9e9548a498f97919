//! Field rules shared by the user and lead forms.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Grammar of an HTML `type=email` input.
    static ref EMAIL_RE: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{3,16}$").unwrap();

    static ref WEBSITE_RE: Regex = Regex::new(
        r"(?i)^https?://[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)+(?::\d{1,5})?(?:[/?#]\S*)?$"
    ).unwrap();
}

pub const EMAIL_MESSAGE: &str = "Enter a valid email.";
pub const USERNAME_MESSAGE: &str = "3–16 chars, letters / numbers / _ only.";
pub const WEBSITE_MESSAGE: &str = "Enter a valid website URL.";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

/// Normalize a website to an absolute http(s) URL; empty stays empty.
pub fn normalize_website(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(String::new());
    }

    let lower = trimmed.to_ascii_lowercase();
    let absolute = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return None;
    } else {
        format!("https://{}", trimmed)
    };

    WEBSITE_RE.is_match(&absolute).then_some(absolute)
}

/// Check a required free-text field; returns the message on failure.
pub fn check_required(value: &str, label: &str, max_chars: usize) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{} is required.", label));
    }
    check_max(value, label, max_chars)
}

pub fn check_max(value: &str, label: &str, max_chars: usize) -> Option<String> {
    if value.chars().count() > max_chars {
        return Some(format!("{} must be at most {} characters.", label, max_chars));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("admin@nexoria.com"));
        assert!(is_valid_email("a.b+tag@sub.example.co"));
        assert!(is_valid_email("user@localhost"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("space in@example.com"));
        assert!(!is_valid_email("user@-bad.com"));
    }

    #[test]
    fn test_username_rule() {
        assert!(is_valid_username("abc"));
        assert!(is_valid_username("user_01"));
        assert!(is_valid_username("sixteen_chars_xx"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("seventeen_chars_x"));
        assert!(!is_valid_username("has-dash"));
        assert!(!is_valid_username("has space"));
    }

    #[test]
    fn test_website_normalization() {
        assert_eq!(normalize_website("  ").as_deref(), Some(""));
        assert_eq!(
            normalize_website("nexoria.com").as_deref(),
            Some("https://nexoria.com")
        );
        assert_eq!(
            normalize_website("http://nexoria.com/about?x=1").as_deref(),
            Some("http://nexoria.com/about?x=1")
        );
        assert_eq!(
            normalize_website("HTTPS://Shop.Example.io:8443").as_deref(),
            Some("HTTPS://Shop.Example.io:8443")
        );
        assert_eq!(normalize_website("ftp://files.example.com"), None);
        assert_eq!(normalize_website("not a url"), None);
        assert_eq!(normalize_website("localhost"), None);
    }

    #[test]
    fn test_length_checks() {
        assert_eq!(check_required("", "Company", 10).as_deref(), Some("Company is required."));
        assert!(check_required("Acme", "Company", 10).is_none());
        assert!(check_max("ééééé", "Notes", 5).is_none());
        assert!(check_max("éééééé", "Notes", 5).is_some());
    }
}
