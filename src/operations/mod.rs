//! Operations module provides the command-level functionality of the CLI

pub mod message;
pub mod posts;
pub mod wiki;
