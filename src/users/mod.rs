pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use handlers::OkResponse;
pub use repo::UserRepo;
pub use repo_types::User;

pub use handlers::routes as router;
