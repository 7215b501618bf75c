//! Alphabet Soup game library
//!
//! Letters float in a bowl of broth simulated with Rapier; the player drags
//! them in order to spell the target word.  Game rules, input and rendering
//! are separate plugins so the rules can be exercised headless.

pub mod bowl;
pub mod config;
pub mod constants;
pub mod environment;
pub mod error;
pub mod fluid;
pub mod game;
pub mod graphics;
pub mod hud;
pub mod input;
pub mod letters;
pub mod meshes;
pub mod rendering;
pub mod selection;
pub mod steam;
pub mod words;
