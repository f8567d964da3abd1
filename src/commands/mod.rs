//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `gitforest` command-line tool.
//!
//! Each command module contains an `Args` struct deriving its `clap`
//! arguments and an `execute` function that calls into the `gitforest`
//! library to perform the core logic.

pub mod clone;
