//! UI module - widgets shared across the window

pub mod components;
