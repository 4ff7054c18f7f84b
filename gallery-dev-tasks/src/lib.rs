//! Development tasks for the Simple File Gallery
//!
//! This crate turns an [`Operation`] into external commands:
//! - [`plans`] - Builds the argument vector of every command
//! - [`opener`] - Picks the platform's browser launcher
//! - [`dispatcher`] - Maps each operation to its action and runs it

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod dispatcher;
pub mod opener;
pub mod plans;

pub use dispatcher::{ACTIONS, ActionFn, ActionFuture, Summary, TaskContext, action_for, dispatch};
pub use gallery_dev_core::{DevConfig, Operation};
