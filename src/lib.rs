pub mod app;
pub mod auth;
pub mod books;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod memory;
pub mod reads;
pub mod state;
pub mod users;

#[cfg(test)]
mod test_support;
