pub mod error;
pub mod extract;
pub mod materialize;
pub mod render;
pub mod validate;
