//! Swellgrid library - infinite Gerstner ocean with camera-relative LOD tiles

pub mod camera;
pub mod cli;
pub mod ocean;
pub mod params;
pub mod tiles;
