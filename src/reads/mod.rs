pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use dto::ReadUpdate;
pub use repo::ReadRepo;
pub use repo_types::Read;

pub use handlers::routes as router;
