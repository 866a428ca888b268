pub mod cli;
pub mod example_data;
pub mod load_config;
pub mod metadata;
pub mod phantom;
