//! Game-agnostic plumbing: layout, software rendering, declarative views with pointer hit
//! testing, a virtual-clock timer queue, tone synthesis, and the winit/pixels app loop.

pub mod app;
pub mod audio;
pub mod graphics;
pub mod pixels_renderer;
pub mod render;
pub mod timers;
pub mod ui;
pub mod view_tree;
