pub mod download;
pub mod error;
pub mod host;
pub mod http_client;
pub mod utils;
