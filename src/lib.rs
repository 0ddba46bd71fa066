//! Keyboard-driven terminal dashboard for EC2 instances.
//!
//! The UI loop owns a single [`app::AppState`] and feeds it [`message::Message`]s
//! through [`update::update`]. Network work requested by a transition is run by
//! the [`driver::Driver`] and comes back as another message on the same queue.

pub mod app;
pub mod aws;
pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod filter;
pub mod input;
pub mod keyboard;
pub mod logging;
pub mod message;
pub mod models;
pub mod ui;
pub mod update;
