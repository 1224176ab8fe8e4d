//! Calckit: the service-agnostic part of the calculator server.
//!
//! - [`config`]: layered `AppConfig` (defaults → YAML → env → CLI)
//! - [`logging`]: tracing subscriber setup
//! - [`api`]: problem helpers, request context, middleware stack
//! - [`server`]: bind/serve loop with signal-driven graceful shutdown
//! - [`web`]: health endpoints
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod logging;
pub mod server;
pub mod web;

pub use config::{AppConfig, CliArgs, ConfigError, LogFormat, LoggingConfig, ServerConfig};
