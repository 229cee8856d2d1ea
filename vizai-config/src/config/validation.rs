//! Semantic validation of a parsed `Config`.

use super::Config;
use crate::error::ConfigError;

impl Config {
    /// Check every field whose type alone does not guarantee a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_endpoint()?;
        self.validate_render_host()?;

        if self.render.compression_level > 9 {
            return Err(ConfigError::Validation(format!(
                "render.compression_level must be between 0 and 9, got {}",
                self.render.compression_level
            )));
        }
        if self.generator.max_response_bytes == 0 {
            return Err(ConfigError::Validation(
                "generator.max_response_bytes must be greater than 0".to_string(),
            ));
        }
        if self.generator.timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "generator.timeout_secs must be greater than 0, or null for no timeout"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn validate_endpoint(&self) -> Result<(), ConfigError> {
        let endpoint = &self.generator.endpoint;
        let parsed = url::Url::parse(endpoint).map_err(|e| {
            ConfigError::Validation(format!(
                "generator.endpoint '{}' is not a URL: {}",
                endpoint, e
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "generator.endpoint must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        if parsed.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::Validation(format!(
                "generator.endpoint '{}' has no host",
                endpoint
            )));
        }
        Ok(())
    }

    fn validate_render_host(&self) -> Result<(), ConfigError> {
        let host = &self.render.host;
        if host.is_empty() {
            return Err(ConfigError::Validation(
                "render.host must not be empty".to_string(),
            ));
        }
        if host.contains("://") {
            return Err(ConfigError::Validation(format!(
                "render.host '{}' must be a bare host, without a scheme",
                host
            )));
        }
        if host.contains(['/', '?', '#']) || host.chars().any(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "render.host '{}' must not contain a path, query or whitespace",
                host
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_https_endpoint_is_valid() {
        let config = Config::new().with_endpoint("https://gen.example.com/api/generate");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_http_endpoint_is_rejected() {
        let config = Config::new().with_endpoint("ftp://example.com/generate");
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("http or https"), "{msg}");
    }

    #[test]
    fn test_garbage_endpoint_is_rejected() {
        let config = Config::new().with_endpoint("localhost 5000");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_host_with_port_is_valid() {
        let config = Config::new().with_render_host("localhost:8000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_host_with_scheme_is_rejected() {
        let config = Config::new().with_render_host("https://kroki.io");
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("without a scheme"), "{msg}");
    }

    #[test]
    fn test_host_with_path_is_rejected() {
        assert!(Config::new().with_render_host("kroki.io/blockdiag").validate().is_err());
        assert!(Config::new().with_render_host("kroki io").validate().is_err());
        assert!(Config::new().with_render_host("").validate().is_err());
    }

    #[test]
    fn test_compression_level_bounds() {
        let mut config = Config::default();
        config.render.compression_level = 0;
        assert!(config.validate().is_ok());
        config.render.compression_level = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_limits_are_rejected() {
        let mut config = Config::default();
        config.generator.max_response_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generator.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }
}
