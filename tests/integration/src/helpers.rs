//! Test helpers for integration tests
//!
//! Provides a self-contained test context, configuration overrides, and
//! assertions over serialized responses.

use std::collections::HashMap;

use anyhow::Result;
use feedback_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use feedback_service::{
    CommentService, ReactionService, ServiceContext, ServiceError, TimelineService,
};
use serde::Serialize;
use serde_json::Value;

/// Test harness owning one engine
pub struct TestContext {
    pub ctx: ServiceContext,
}

impl TestContext {
    /// Start a context with default configuration
    pub fn start() -> Self {
        Self::start_with_config(AppConfig::default())
    }

    /// Start a context from explicit environment-style overrides
    pub fn start_with_env(vars: &[(&str, &str)]) -> Result<Self> {
        let config = test_config(vars)?;
        Ok(Self::start_with_config(config))
    }

    pub fn start_with_config(config: AppConfig) -> Self {
        // Every test shares one subscriber; later calls are no-ops
        let _ = try_init_tracing_with_config(TracingConfig::for_app(&config.app));
        Self {
            ctx: ServiceContext::from_config(config),
        }
    }

    pub fn reactions(&self) -> ReactionService<'_> {
        ReactionService::new(&self.ctx)
    }

    pub fn comments(&self) -> CommentService<'_> {
        CommentService::new(&self.ctx)
    }

    pub fn timeline(&self) -> TimelineService<'_> {
        TimelineService::new(&self.ctx)
    }
}

/// Build a configuration from the given variables only
///
/// The process environment is ignored so tests do not depend on the shell.
pub fn test_config(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect();

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Serialize a response DTO to JSON for field assertions
pub fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Assert a service call failed with the expected status and error code
pub fn assert_error<T>(
    result: Result<T, ServiceError>,
    expected_status: u16,
    expected_code: &str,
) -> Result<()> {
    match result {
        Ok(_) => anyhow::bail!(
            "Expected error {} ({}), got success",
            expected_code,
            expected_status
        ),
        Err(err) => {
            if err.status_code() != expected_status || err.error_code() != expected_code {
                anyhow::bail!(
                    "Expected {} ({}), got {} ({}): {}",
                    expected_code,
                    expected_status,
                    err.error_code(),
                    err.status_code(),
                    err
                );
            }
            Ok(())
        }
    }
}
