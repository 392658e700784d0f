use crate::utils::error::{BuyerError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> BuyerError {
    BuyerError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// The registrar endpoint must be an absolute http(s) URL with a host.
pub fn validate_url(field: &str, raw: &str) -> Result<()> {
    let url = Url::parse(raw).map_err(|e| invalid(field, raw, format!("not a URL ({})", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(field, raw, format!("scheme {} is not http or https", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid(field, raw, "URL has no host"));
    }
    Ok(())
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    match path {
        "" => Err(invalid(field, path, "path is empty")),
        p if p.contains('\0') => Err(invalid(field, path, "path contains a NUL byte")),
        _ => Ok(()),
    }
}

pub fn validate_at_least(field: &str, value: u64, min: u64) -> Result<()> {
    (value >= min)
        .then_some(())
        .ok_or_else(|| invalid(field, value, format!("must be {} or more", min)))
}

/// Missing and blank values are both reported as missing.
pub fn validate_required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BuyerError::MissingConfigError {
            field: field.to_string(),
        }),
    }
}

fn domain_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?i)([a-z0-9\p{L}]([a-z0-9\p{L}-]{0,61}[a-z0-9\p{L}])?\.)+[a-z\p{L}][a-z0-9\p{L}-]*[a-z0-9\p{L}]$")
            .expect("domain pattern is a valid regex")
    })
}

/// Loose syntactic check used only to warn about suspicious list entries.
pub fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.len() > 253 || !domain_pattern().is_match(domain) {
        return Err(invalid("domain", domain, "does not look like a fully qualified domain name"));
    }
    Ok(())
}
