//! Corpus-level search: grouping occurrences by article.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use quill_types::MatchGroup;

use crate::error::SearchError;
use crate::pattern::{Occurrences, Pattern};

/// Bytes scanned between deadline checks inside a single body.
const DEADLINE_CHECK_BYTES: usize = 64 * 1024;

/// Optional bounds on a single search call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Stop with `SearchError::DeadlineExceeded` once this instant passes.
    pub deadline: Option<Instant>,
}

impl SearchLimits {
    /// Limits with no deadline.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Limits whose deadline is `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
        }
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

/// Finds every occurrence of `pattern` in every body of `corpus`.
///
/// See [`find_compiled`] for the ordering and grouping rules.
///
/// # Errors
///
/// Returns `SearchError::InvalidArgument` if `pattern` is empty.
pub fn find<I, S>(pattern: &str, corpus: I) -> Result<Vec<MatchGroup>, SearchError>
where
    I: IntoIterator<Item = (i64, S)>,
    S: AsRef<str>,
{
    find_within(pattern, corpus, SearchLimits::unbounded())
}

/// Like [`find`], but gives up once `limits.deadline` passes.
///
/// # Errors
///
/// Returns `SearchError::InvalidArgument` if `pattern` is empty and
/// `SearchError::DeadlineExceeded` if the deadline passes mid-scan.
pub fn find_within<I, S>(
    pattern: &str,
    corpus: I,
    limits: SearchLimits,
) -> Result<Vec<MatchGroup>, SearchError>
where
    I: IntoIterator<Item = (i64, S)>,
    S: AsRef<str>,
{
    let pattern = Pattern::new(pattern)?;
    find_compiled(&pattern, corpus, limits)
}

/// Searches `corpus` with an already compiled pattern.
///
/// Every body is scanned in full regardless of how the corpus was selected.
/// The result holds one [`MatchGroup`] per article with at least one
/// occurrence, in ascending article id order whatever the corpus order.
/// Articles without occurrences are omitted. If an article id appears more
/// than once, only its first body is searched.
///
/// # Errors
///
/// Returns `SearchError::DeadlineExceeded` if `limits.deadline` passes
/// before the corpus is exhausted.
pub fn find_compiled<I, S>(
    pattern: &Pattern,
    corpus: I,
    limits: SearchLimits,
) -> Result<Vec<MatchGroup>, SearchError>
where
    I: IntoIterator<Item = (i64, S)>,
    S: AsRef<str>,
{
    let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    let mut articles_scanned = 0usize;

    for (article_id, body) in corpus {
        if limits.expired() {
            return Err(SearchError::DeadlineExceeded { articles_scanned });
        }
        if groups.contains_key(&article_id) {
            tracing::debug!(article_id, "duplicate article in corpus, ignoring");
            continue;
        }

        let offsets = collect_offsets(pattern, body.as_ref(), &limits)
            .ok_or(SearchError::DeadlineExceeded { articles_scanned })?;
        groups.insert(article_id, offsets);
        articles_scanned += 1;
    }

    let result: Vec<MatchGroup> = groups
        .into_iter()
        .filter(|(_, offsets)| !offsets.is_empty())
        .map(|(article_id, offsets)| MatchGroup {
            article_id,
            offsets,
        })
        .collect();

    tracing::debug!(
        pattern_chars = pattern.char_len(),
        articles_scanned,
        articles_matched = result.len(),
        "occurrence search complete"
    );

    Ok(result)
}

/// Collects all offsets in `body`, or `None` if the deadline passed first.
fn collect_offsets(pattern: &Pattern, body: &str, limits: &SearchLimits) -> Option<Vec<usize>> {
    let mut occurrences = pattern.occurrences(body);
    if limits.deadline.is_none() {
        return Some(occurrences.collect());
    }

    let mut offsets = Vec::new();
    while !Occurrences::scan(&mut occurrences, DEADLINE_CHECK_BYTES, &mut offsets) {
        if limits.expired() {
            return None;
        }
    }
    Some(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expired() -> SearchLimits {
        SearchLimits {
            deadline: Some(Instant::now()),
        }
    }

    #[test]
    fn deadline_passing_mid_body_abandons_the_body() {
        let pattern = Pattern::new("ab").unwrap();
        let body = "ab".repeat(DEADLINE_CHECK_BYTES);

        assert_eq!(collect_offsets(&pattern, &body, &expired()), None);
    }

    #[test]
    fn body_finished_in_first_chunk_ignores_late_deadline() {
        let pattern = Pattern::new("ab").unwrap();
        let body = "ab".repeat(DEADLINE_CHECK_BYTES / 2);

        let offsets = collect_offsets(&pattern, &body, &expired()).unwrap();
        assert_eq!(offsets.len(), DEADLINE_CHECK_BYTES / 2);
        assert_eq!(offsets.last(), Some(&(DEADLINE_CHECK_BYTES - 2)));
    }

    #[test]
    fn chunk_boundary_inside_a_match_keeps_the_match() {
        let pattern = Pattern::new("xy").unwrap();
        let mut body = "-".repeat(DEADLINE_CHECK_BYTES - 1);
        body.push_str("xy");
        let limits = SearchLimits::with_timeout(Duration::from_secs(60));

        let offsets = collect_offsets(&pattern, &body, &limits).unwrap();
        assert_eq!(offsets, vec![DEADLINE_CHECK_BYTES - 1]);
    }

    #[test]
    fn no_deadline_never_expires() {
        assert!(!SearchLimits::unbounded().expired());
        assert!(expired().expired());
    }
}
