// /////////////////////////////////////////////////////////////////////////////
// archstream
// Copyright (c) 2025 A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Configuration
//!
//! Bootstrap-phase configuration. `AppConfig` holds validated settings after
//! CLI parsing and environment-variable overrides have both been applied;
//! it is immutable from then on so it can be shared across tasks without
//! synchronization.

use archstream_domain::value_objects::CompressionMethod;
use std::env;

/// Log verbosity, mapped onto a `tracing::Level` at subscriber init time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Immutable, validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    log_level: LogLevel,
    compression: CompressionMethod,
}

impl AppConfig {
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn compression(&self) -> CompressionMethod {
        self.compression
    }

    /// Reads `ARCHSTREAM_LOG_LEVEL` and `ARCHSTREAM_COMPRESSION`, falling
    /// back to defaults for anything unset or unrecognized.
    pub fn from_env() -> Self {
        let mut builder = AppConfig::builder();
        if let Ok(raw) = env::var("ARCHSTREAM_LOG_LEVEL") {
            if let Some(level) = LogLevel::parse(&raw) {
                builder = builder.log_level(level);
            }
        }
        if let Ok(raw) = env::var("ARCHSTREAM_COMPRESSION") {
            match raw.to_ascii_lowercase().as_str() {
                "stored" => builder = builder.compression(CompressionMethod::Stored),
                "deflate" => builder = builder.compression(CompressionMethod::Deflate),
                _ => {}
            }
        }
        builder.build()
    }
}

/// Builder for [`AppConfig`]. CLI flags apply on top of whatever
/// [`AppConfig::from_env`] already resolved, giving CLI flags the higher
/// precedence.
#[derive(Debug, Clone, Default)]
pub struct AppConfigBuilder {
    log_level: LogLevel,
    compression: CompressionMethod,
}

impl AppConfigBuilder {
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn compression(mut self, method: CompressionMethod) -> Self {
        self.compression = method;
        self
    }

    pub fn build(self) -> AppConfig {
        AppConfig {
            log_level: self.log_level,
            compression: self.compression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_info_and_deflate() {
        let config = AppConfig::builder().build();
        assert_eq!(config.log_level(), LogLevel::Info);
        assert_eq!(config.compression(), CompressionMethod::Deflate);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = AppConfig::builder()
            .log_level(LogLevel::Debug)
            .compression(CompressionMethod::Stored)
            .build();
        assert_eq!(config.log_level(), LogLevel::Debug);
        assert_eq!(config.compression(), CompressionMethod::Stored);
    }
}
