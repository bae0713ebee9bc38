//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod generation_repo;
pub mod rating_repo;
pub mod view_repo;

pub use category_repo::CategoryRepo;
pub use generation_repo::GenerationRepo;
pub use rating_repo::RatingRepo;
pub use view_repo::ViewRepo;
