pub mod finding_renderer;
