//! Service context - dependency container for services
//!
//! Holds the shared feedback engine and the configuration it was built from.

use std::sync::Arc;

use feedback_common::{AppConfig, ConfigError};
use feedback_core::{Snowflake, SnowflakeGenerator};
use feedback_engine::FeedbackEngine;

/// Service context containing all dependencies
///
/// Cheap to clone; every clone shares the same engine.
#[derive(Clone)]
pub struct ServiceContext {
    config: Arc<AppConfig>,
    engine: Arc<FeedbackEngine>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a context around an existing engine
    pub fn new(
        config: Arc<AppConfig>,
        engine: Arc<FeedbackEngine>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            config,
            engine,
            snowflake_generator,
        }
    }

    /// Build a fresh engine from configuration
    pub fn from_config(config: AppConfig) -> Self {
        let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.ids.worker_id));
        let engine = Arc::new(FeedbackEngine::new(
            config.feedback.clone(),
            Arc::clone(&snowflake_generator),
        ));
        Self::new(Arc::new(config), engine, snowflake_generator)
    }

    /// Load configuration from the environment and build a context
    ///
    /// # Errors
    /// Returns `ConfigError` if an environment variable holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        AppConfig::from_env().map(Self::from_config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn engine(&self) -> &FeedbackEngine {
        self.engine.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::from_config(AppConfig::default())
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("app", &self.config.app.name)
            .field("window", &self.engine.window())
            .field("engine", &self.engine.stats())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    config: Option<AppConfig>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an ID generator with other components
    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext, defaulting anything not provided
    pub fn build(self) -> ServiceContext {
        let config = self.config.unwrap_or_default();
        let snowflake_generator = self
            .snowflake_generator
            .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(config.ids.worker_id)));
        let engine = Arc::new(FeedbackEngine::new(
            config.feedback.clone(),
            Arc::clone(&snowflake_generator),
        ));
        ServiceContext::new(Arc::new(config), engine, snowflake_generator)
    }
}
