pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use dto::NewBook;
pub use repo::BookRepo;
pub use repo_types::{Book, RankedBook};

pub use handlers::routes as router;
