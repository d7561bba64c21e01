// Library root: the app orchestrator, its configuration, and the message
// types shared with front ends.

pub mod app;
pub mod config;
pub mod protocol;
