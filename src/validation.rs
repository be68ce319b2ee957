use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Absolute http(s) URL with a host.
pub fn is_valid_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Name fields are 2-30 characters.
pub fn is_valid_name(name: &str) -> bool {
    let len = name.chars().count();
    (2..=30).contains(&len)
}
