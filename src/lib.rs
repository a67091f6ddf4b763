// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod model;
pub mod specs;

pub mod edits;
pub mod extract;
pub mod loader;
pub mod net;
pub mod notice;
pub mod refresh;
pub mod render;
pub mod store;
pub mod sync;
pub mod version;
