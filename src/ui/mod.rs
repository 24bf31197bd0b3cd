//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the event loop that turns terminal input, stream
//!   messages, and health observations into [`crate::core::app::AppAction`]s.
//! - [`renderer`] and [`layout`]: frame composition.
//! - [`theme`]: style policy.
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! domain logic and backend coordination.

pub mod chat_loop;
pub mod layout;
pub mod renderer;
pub mod theme;
