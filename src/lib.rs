//! # Claude Context Statusline
//!
//! Renders a single statusline for Claude Code sessions from the JSON the
//! `statusLine` hook pipes to stdin: current folder, model, a context-window
//! usage bar with token counts, and the session cost.
//!
//! ## Overview
//!
//! One pass per invocation: read stdin, extract a [`models::StatusSnapshot`]
//! with defaults for anything missing, render it. Input that is not JSON at
//! all prints `? no data` instead, and the process still exits 0.
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Command-line argument parsing and configuration
pub mod cli;

/// Display formatting for text and JSON output
pub mod display;

/// Hook input parsing and the extracted status snapshot
pub mod models;

/// JSON access helpers, number formatting, and logging setup
pub mod utils;
