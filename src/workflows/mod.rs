//! Multi-step workflows built from single-purpose commands.

pub mod provisioning;

pub use provisioning::{GuestLogin, select_fallback_teams};
