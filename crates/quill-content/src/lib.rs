//! Content store for the Quill service.
//!
//! Implements create/get for users, articles, and comments, the per-article
//! comment listing, and the candidate query that feeds the occurrence
//! finder. Every function borrows a connection from the caller; the caller
//! owns acquisition and release (normally a pooled connection scoped to one
//! request).
//!
//! Inserts are single statements, so each create is atomic. Identifiers are
//! assigned by the caller and a reused identifier is reported as
//! [`ContentError::AlreadyExists`].

mod articles;
mod comments;
mod error;
mod users;

pub use articles::{candidate_articles, create_article, get_article, CreateArticleParams};
pub use comments::{create_comment, get_comment, list_comments_for_article, CreateCommentParams};
pub use error::ContentError;
pub use users::{create_user, get_user, CreateUserParams};
