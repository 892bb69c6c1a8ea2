use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the error policy, health path, or log filter
    /// is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_errors_config()?;
        self.validate_health_config()?;
        self.validate_telemetry_config()?;
        Ok(())
    }

    fn validate_errors_config(&self) -> anyhow::Result<()> {
        let status = self.errors.default_status;
        if !(500..=599).contains(&status) {
            anyhow::bail!("errors.default_status must be a 5xx status code, got {status}");
        }

        Ok(())
    }

    fn validate_health_config(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        Ok(())
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        EnvFilter::try_new(&self.telemetry.log_filter)
            .map_err(|e| anyhow::anyhow!("invalid telemetry.log_filter '{}': {e}", self.telemetry.log_filter))?;

        Ok(())
    }
}
