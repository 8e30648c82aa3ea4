pub mod config_helper;
pub mod text_normalizer;
pub mod version;
