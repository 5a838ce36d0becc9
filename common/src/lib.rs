pub mod chart;
pub mod config;
pub mod extract;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod transform;
