use crate::domain::model::CandidateDomain;
use crate::domain::ports::DomainSource;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Plain-text candidate list, one name per line.
#[derive(Debug, Clone)]
pub struct LocalDomainList {
    path: PathBuf,
}

impl LocalDomainList {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Splits on line breaks only: no trimming, no de-duplication, and blank
/// lines are kept as candidates. A final line break does not add an entry.
///
/// `\r\n` and a lone `\r` both end a line, as do the Unicode line and
/// paragraph separators.
pub fn parse_domain_list(content: &str) -> Vec<CandidateDomain> {
    let mut domains = Vec::new();
    let mut rest = content;
    while !rest.is_empty() {
        let Some(at) = rest.find(is_line_break) else {
            domains.push(rest.to_string());
            break;
        };
        domains.push(rest[..at].to_string());
        let tail = &rest[at..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        rest = &tail[width..];
    }
    domains
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl DomainSource for LocalDomainList {
    async fn candidates(&self) -> Result<Vec<CandidateDomain>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let domains = parse_domain_list(&content);
        tracing::debug!(
            "Read {} candidate domains from {}",
            domains.len(),
            self.path.display()
        );
        Ok(domains)
    }
}
