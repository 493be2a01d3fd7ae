//! Build-and-deploy pipeline for a git-hosted static site.
//!
//! Three sequential phases: sync the content submodule, run the external
//! generator and stage its output, publish the staged site to the hosting
//! branch. State lives entirely in the filesystem and the involved git
//! repositories; a failed external command aborts the run.

pub mod build;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod git;
pub mod publish;
pub mod sync;
