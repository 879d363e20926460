pub mod config;
pub mod mock_backend;
pub mod server;
