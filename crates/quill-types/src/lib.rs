//! Shared types for the Quill content service.
//!
//! This crate holds the records that cross crate boundaries: the persisted
//! entities (`User`, `Article`, `Comment`) and the derived search result
//! (`MatchGroup`). It has no knowledge of storage or HTTP; every other crate
//! in the workspace depends on it for these definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered author or commenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Caller-assigned unique identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// An article authored by a user.
///
/// The body is the text searched by the occurrence finder and never changes
/// after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Caller-assigned unique identifier.
    pub id: i64,
    pub title: String,
    pub body: String,
    /// ID of the authoring [`User`].
    pub author_id: i64,
}

/// A comment posted by a user on an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Caller-assigned unique identifier.
    pub id: i64,
    pub title: String,
    pub body: String,
    /// ID of the [`Article`] being commented on.
    pub article_id: i64,
    /// ID of the commenting [`User`].
    pub user_id: i64,
}

/// All occurrences of a search pattern within one article.
///
/// Offsets are 0-based character positions into the article body, strictly
/// ascending. A group is never produced with an empty offset list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub article_id: i64,
    pub offsets: Vec<usize>,
}

/// The kinds of persisted entity, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Article,
    Comment,
}

impl EntityKind {
    /// Returns the lowercase label for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Article => "article",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown entity label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: {0}")]
pub struct ParseEntityKindError(pub String);

impl FromStr for EntityKind {
    type Err = ParseEntityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "article" => Ok(Self::Article),
            "comment" => Ok(Self::Comment),
            other => Err(ParseEntityKindError(other.to_string())),
        }
    }
}
