/// Data models
///
/// Row structs (`sqlx::FromRow`) for the users, posts and post_reactions
/// tables, the response views assembled by the service layer, and the
/// pagination envelope shared by every listing endpoint.
mod page;
mod post;
mod user;

pub use page::{Page, PageParams};
pub use post::{Post, PostReaction, PostView};
pub use user::{PublicUser, User};
