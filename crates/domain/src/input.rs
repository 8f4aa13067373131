use std::sync::Arc;

/// One line of input: the verbatim (trimmed) text plus the domain extracted
/// from it.
///
/// Lines may carry a leading rank such as `42,` and a trailing URL path, as
/// in ranked site lists. Both are stripped from the domain but kept in `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub raw: Arc<str>,
    pub domain: Arc<str>,
}

impl InputLine {
    /// Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        let raw = line.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: Arc::from(raw),
            domain: Arc::from(clean_domain(raw)),
        })
    }
}

/// Strips an optional `<digits>,` prefix and everything from the first `/`.
pub fn clean_domain(line: &str) -> &str {
    let without_rank = match line.split_once(',') {
        Some((rank, rest)) if !rank.is_empty() && rank.bytes().all(|b| b.is_ascii_digit()) => {
            rest
        }
        _ => line,
    };
    match without_rank.find('/') {
        Some(idx) => &without_rank[..idx],
        None => without_rank,
    }
}
