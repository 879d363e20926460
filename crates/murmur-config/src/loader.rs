use std::path::Path;

use secrecy::ExposeSecret;

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

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is empty
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.api_key.expose_secret().is_empty() {
            anyhow::bail!("auth.api_key must not be empty");
        }
        if self.provider.account_id.is_empty() {
            anyhow::bail!("provider.account_id must not be empty");
        }
        if self.provider.model.is_empty() {
            anyhow::bail!("provider.model must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Config;

    #[test]
    fn minimal_config_parses() {
        let raw = r#"
            [auth]
            api_key = "sk-test"

            [provider]
            account_id = "acct"
            api_token = "token"
            model = "@cf/openai/whisper-large-v3-turbo"
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        config.validate().unwrap();

        assert!(config.storage.is_none());
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
    }

    #[test]
    fn empty_model_rejected() {
        let raw = r#"
            [auth]
            api_key = "sk-test"

            [provider]
            account_id = "acct"
            api_token = "token"
            model = ""
        "#;

        let config: Config = toml::from_str(raw).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_fields_rejected() {
        let raw = r#"
            [auth]
            api_key = "sk-test"
            extra = true

            [provider]
            account_id = "acct"
            api_token = "token"
            model = "m"
        "#;

        assert!(toml::from_str::<Config>(raw).is_err());
    }
}
