pub mod app;
pub mod catalog;
pub mod chat_stream;
pub mod config;
pub mod forms;
pub mod health;
pub mod message;
pub mod model;
pub mod send_flow;
pub mod session;
