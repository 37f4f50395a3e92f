//! Single-purpose commands: one method per REST call, grouped by API area.
//!
//! Each command builds one request, sends it with the session's cookies and
//! checks the status against the endpoint's documented value. Payload
//! builders are plain functions so they can be tested without a server.

pub mod bots;
pub mod channels;
pub mod jobs;
pub mod plugins;
pub mod posts;
pub mod preferences;
pub mod roles;
pub mod slash_commands;
pub mod system;
pub mod teams;
pub mod users;
pub mod webhooks;
