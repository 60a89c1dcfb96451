//! Convenience extensions for a Reddit API client.
//!
//! Two loosely related pieces:
//!
//! - [`patch`]: an [`ExtendedClient`](patch::ExtendedClient) adapter plus a
//!   [`PatchRegistry`](patch::PatchRegistry) that installs and reverts a
//!   fixed table of extension methods (`message`, wiki `update`) on it.
//! - [`filters`]: [`Filterable`](filters::Filterable), a lazy
//!   predicate-chaining view over any iterator of model objects, with
//!   factory functions and [`FilterCapsule`](filters::FilterCapsule)
//!   compound predicates.

pub mod cli;
pub mod client;
pub mod config;
pub mod filters;
pub mod models;
pub mod operations;
pub mod patch;
pub mod util;

pub use client::{RedditApi, RedditClient, RedditClientError};
pub use filters::{FilterCapsule, Filterable};
pub use patch::{ExtendedClient, PatchError, PatchRegistry};
