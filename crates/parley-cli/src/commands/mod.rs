pub mod chat;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod list;
pub mod new;
pub mod rename;
pub mod send;
pub mod show;
