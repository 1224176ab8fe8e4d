//! Calculator module.
//!
//! - [`domain::service::Service`]: the evaluator, implementing
//!   [`calculator_sdk::CalculatorApi`]
//! - [`api::rest`]: `GET /calc` and `POST /calc`
//! - [`web`]: the HTML form at `/` and its static assets
//! - [`module::CalculatorModule`]: config lookup and router assembly
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod module;
pub mod web;

pub use config::CalculatorConfig;
pub use domain::service::Service;
pub use module::{CalculatorModule, MODULE_NAME};
