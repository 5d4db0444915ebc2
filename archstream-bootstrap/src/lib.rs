// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # archstream-bootstrap
//!
//! Composition root: CLI parsing, configuration precedence, logging
//! subscriber install, and signal-driven shutdown for the `archstream`
//! binary. None of this is reusable library surface for the core itself -
//! it exists so the core has one real caller to be exercised through.

pub mod cli;
pub mod config;
pub mod logger;
pub mod shutdown;

pub use cli::Cli;
pub use config::{AppConfig, AppConfigBuilder, LogLevel};
pub use shutdown::{CancellationToken, ShutdownCoordinator};
