//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Task queries are
//! owner-scoped in SQL: a row belonging to another user is simply absent
//! from every result, so callers cannot distinguish "missing" from
//! "not mine".

pub mod task_repo;
pub mod user_repo;

pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
