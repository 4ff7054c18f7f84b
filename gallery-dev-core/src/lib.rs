//! Gallery Dev Core - Foundation types for the development helper
//!
//! This crate provides the types shared by the other crates: the error
//! type, validated identifiers, the closed set of operations, structured
//! command lines and the development environment configuration.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod config;
pub mod error;
pub mod operation;
pub mod types;

pub use command::CommandSpec;
pub use config::{BuildArgs, DevConfig};
pub use error::{Error, Result};
pub use operation::Operation;
pub use types::{ContainerId, ImageTag};
