//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod access;
pub mod account;
pub mod admin;
pub mod user;

pub use account::{CreateArgs, ModifyArgs};
pub use admin::{handle_admin_command, AdminCommands};
pub use user::{handle_user_command, UserCommands};
