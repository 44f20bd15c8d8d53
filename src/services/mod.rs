/// Business logic layer
///
/// Each service owns a pool handle and receives the acting user explicitly
/// on every call; there is no ambient "current user" state anywhere.
mod auth;
mod feed;
mod follow;
mod posts;
mod users;

pub use auth::{AuthService, IssuedToken};
pub use feed::FeedService;
pub use follow::FollowService;
pub use posts::{PostPatch, PostService};
pub use users::{UserPatch, UserService};
