use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::{Result, SessionGateway};
use crate::providers::GeminiGateway;

pub fn create_gateway(config: &AppConfig) -> Result<Arc<dyn SessionGateway>> {
    let gateway = GeminiGateway::from_config(config)?;
    tracing::info!(model = %config.model, base_url = %config.base_url, "Created Gemini gateway");
    Ok(Arc::new(gateway))
}
