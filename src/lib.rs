pub mod animation;
pub mod app;
pub mod config;
pub mod geometry;
pub mod palette;
pub mod raster;
pub mod render;
pub mod scene;
pub mod surface;
pub mod terminal;
