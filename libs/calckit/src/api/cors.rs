use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

/// Build a CORS layer from config. Entries that fail to parse are skipped.
#[must_use]
pub fn build_cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if cfg.allowed_origins.iter().any(|o| o == "*") {
        warn!(
            "CORS is configured with allowed_origins=['*']. \
             Any website may call the calculator API from a browser."
        );
        layer = layer.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = cfg
            .allowed_origins
            .iter()
            .filter_map(|s| http::HeaderValue::from_str(s).ok())
            .collect();
        if !origins.is_empty() {
            layer = layer.allow_origin(origins);
        }
    }

    if cfg.allowed_methods.iter().any(|m| m == "*") {
        layer = layer.allow_methods(Any);
    } else {
        let methods: Vec<http::Method> = cfg
            .allowed_methods
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !methods.is_empty() {
            layer = layer.allow_methods(methods);
        }
    }

    if cfg.allowed_headers.iter().any(|h| h == "*") {
        layer = layer.allow_headers(Any);
    } else {
        let headers: Vec<http::HeaderName> = cfg
            .allowed_headers
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        if !headers.is_empty() {
            layer = layer.allow_headers(headers);
        }
    }

    layer
}
