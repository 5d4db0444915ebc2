// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Logger
//!
//! Installs the process-wide `tracing` subscriber from [`AppConfig`]'s log
//! level. Separate from the `tracing` calls scattered through the
//! application and infrastructure layers - this module only owns the
//! one-time subscriber setup the binary entrypoint needs.

use crate::config::AppConfig;

/// Initializes a `fmt` subscriber at the level configured in `config`.
/// Idempotent-enough for the bootstrap's own use (called once from `main`);
/// a second call within the same process will panic, matching
/// `tracing`'s own global-default contract.
pub fn init_tracing(config: &AppConfig) {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(config.log_level().to_tracing_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("tracing subscriber already installed");
}
