//! Router assembly for the calculator module.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use calckit::AppConfig;
use calckit::config::module_config_or_default;
use calculator_sdk::CalculatorApi;
use tracing::{debug, info};

use crate::api::rest;
use crate::config::CalculatorConfig;
use crate::domain::service::Service;
use crate::web;

/// Key of this module under `modules:` in the application config.
pub const MODULE_NAME: &str = "calculator";

/// Calculator module: evaluator, `/calc` REST API and the HTML form.
#[derive(Debug, Clone, Default)]
pub struct CalculatorModule {
    config: CalculatorConfig,
}

impl CalculatorModule {
    #[must_use]
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    /// Read `modules.calculator.config`, falling back to defaults.
    ///
    /// # Errors
    /// Fails when the section exists but does not deserialize.
    pub fn from_app_config(app: &AppConfig) -> anyhow::Result<Self> {
        let config: CalculatorConfig = module_config_or_default(app, MODULE_NAME)
            .with_context(|| format!("invalid configuration for module '{MODULE_NAME}'"))?;
        debug!(
            strict_domain = config.strict_domain,
            title = %config.title,
            "Loaded calculator config"
        );
        Ok(Self::new(config))
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Build the module router backed by the domain service.
    ///
    /// # Errors
    /// Fails if the HTML form cannot be rendered.
    pub fn router(&self) -> anyhow::Result<Router> {
        let api: Arc<dyn CalculatorApi> = Arc::new(Service::new(self.config.strict_domain));
        self.router_with_api(api)
    }

    /// Build the module router around any `CalculatorApi` implementation.
    ///
    /// # Errors
    /// Fails if the HTML form cannot be rendered.
    pub fn router_with_api(&self, api: Arc<dyn CalculatorApi>) -> anyhow::Result<Router> {
        let router = web::register_routes(Router::new(), &self.config.title)?;
        let router = rest::routes::register_routes(router, api);

        info!(
            strict_domain = self.config.strict_domain,
            "Calculator module routes registered"
        );
        Ok(router)
    }
}
