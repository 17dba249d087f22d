//! Seams towards the host window server.

pub mod enhanced_ui;
pub mod geometry;
pub mod headless;
pub mod window_server;
