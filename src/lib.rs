//! agentchat is a terminal client for chatting with backend-hosted agents and
//! teams of agents.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] talks to the backend: health checks, catalog listing, and the
//!   streamed chat endpoints, decoded into [`api::StreamChunk`]s.
//! - [`core`] owns the session store, the send-message flow, background
//!   streaming and health polling, creation forms, and persisted configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`cli`] parses arguments and dispatches to the interface or to the
//!   one-shot commands.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
