#![doc = "pages-deploy-core: core logic library for pages-deploy."]

//! Branch policy, path planning, settings synthesis and the deploy pipeline.
//! CLI concerns (argument parsing, primary settings adaptation) live in the
//! `pages-deploy` binary crate.
//!
//! # Usage
//! Add this as a dependency for classification, planning and pipeline code.

pub mod build;
pub mod classify;
pub mod contract;
pub mod deploy;
pub mod environment;
pub mod error;
pub mod exec;
pub mod git;
pub mod plan;
pub mod synthesis;
