//! Gemcha is a terminal chat client for the Google Gemini API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns session state: the transcript, startup configuration,
//!   and the app object driving each interaction.
//! - [`api`] wraps the Gemini `generateContent` endpoint: one awaited call
//!   per user turn, no streaming.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`commands`] implements the slash commands used by the chat loop,
//!   including the plain-text chat-log export.
//!
//! The runtime entrypoint lives in the binary crate (`src/main.rs`) and
//! routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
