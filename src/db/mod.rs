/// Database access layer
///
/// Flat repository functions over `&PgPool` with raw SQL. Transaction-scoped
/// operations (the reaction toggle) take `&mut PgConnection` instead so the
/// service layer controls the transaction boundary.
pub mod follow_repo;
pub mod post_repo;
pub mod reaction_repo;
pub mod user_repo;
