//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the render state, the globe, and the orbit
//! camera, and turns keyboard and mouse input into climate changes.

mod core;
mod dispatch;
mod event_handler;
mod init;
mod render;
mod shutdown;
mod title;

pub use core::ClimaSimApp;
