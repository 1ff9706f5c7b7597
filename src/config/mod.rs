mod schema;

pub use schema::{Config, GeminiConfig, WardrobeConfig};
