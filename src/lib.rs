pub mod content;
pub mod deck;
pub mod input;
pub mod orientation;

// Interactive visualization
pub mod attractor;
pub mod interactive;

// Session wiring & collaborators
pub mod session;
pub mod gallery;

pub mod config;
pub mod error;
