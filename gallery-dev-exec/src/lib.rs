//! External process execution with pluggable runners
//!
//! Every action hands its commands to a [`CommandRunner`]. The production
//! [`SystemRunner`] spawns real processes; [`MockRunner`] records the
//! commands and replays scripted results so actions can be tested without
//! a container runtime installed.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod backend;
pub mod mock;
pub mod system;

pub use backend::{CommandRunner, Outcome};
pub use mock::{MockRunner, Mode};
pub use system::SystemRunner;

// Re-export commonly used types
pub use gallery_dev_core::{CommandSpec, Error, Result};
