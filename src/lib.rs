//! Level-based typing tutor: a curriculum of generated drills, a keystroke
//! scoring engine, and the terminal front end around them.

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod feedback;
pub mod generator;
pub mod keyboard;
pub mod session;
pub mod store;
pub mod ui;
