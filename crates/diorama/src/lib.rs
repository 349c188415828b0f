//! A slide deck controller with keyboard, swipe and direct-jump navigation,
//! a mirrored location history and a presenter-notes window.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod history;
pub mod keyboard;
pub mod logging;
pub mod presenter;
pub mod render;
pub mod slide;
pub mod source;
pub mod theme;

pub use deck::{Deck, DeckOptions, Navigation, Navigator, RenderedSlide};
pub use error::{DeckError, Result};
