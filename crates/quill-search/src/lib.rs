//! Overlap-preserving substring search over article bodies.
//!
//! Given a literal pattern and a corpus of `(article_id, body)` pairs, the
//! finder reports every character offset at which the pattern begins,
//! including overlapping occurrences, grouped per article:
//!
//! ```
//! use quill_search::find;
//!
//! let groups = find("aa", [(2, "xaa"), (1, "aaaa")]).unwrap();
//! assert_eq!(groups[0].article_id, 1);
//! assert_eq!(groups[0].offsets, vec![0, 1, 2]);
//! assert_eq!(groups[1].article_id, 2);
//! assert_eq!(groups[1].offsets, vec![1]);
//! ```
//!
//! The finder is a pure function of its inputs. It holds no state between
//! calls, performs no I/O, and never trusts that the corpus was prefiltered:
//! a storage layer may hand it any superset of the matching articles.

mod error;
mod finder;
mod pattern;

pub use error::SearchError;
pub use finder::{find, find_compiled, find_within, SearchLimits};
pub use pattern::{Occurrences, Pattern};
