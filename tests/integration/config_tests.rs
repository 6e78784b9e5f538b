//! Configuration loading and validation integration tests

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tweet_purge::config::{LogFormat, PurgeConfig, Validate};
    use tweet_purge::{Config, PurgeError};

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    // ==================== File loading ====================

    /// Test that a partial file fills the rest from defaults
    #[tokio::test]
    async fn test_partial_file_uses_defaults() {
        let file = write_config("executor:\n  backoff_secs: 3\n");
        let config = assert_ok!(Config::from_file(file.path()).await);

        assert_eq!(config.executor().backoff_secs, 3);
        assert_eq!(config.executor().max_concurrent, 100);
        assert_eq!(config.endpoint().csrf_header, "x-csrf-token");
        assert_eq!(config.logging().format, LogFormat::Pretty);
    }

    /// Test that malformed YAML is a configuration error
    #[tokio::test]
    async fn test_malformed_file() {
        let file = write_config("executor: [not, a, map\n");
        let error = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(error, PurgeError::Config(_)));
    }

    /// Test that an invalid endpoint in the file is rejected
    #[tokio::test]
    async fn test_file_with_invalid_endpoint() {
        let file = write_config("endpoint:\n  url: \"ftp://example.com/destroy\"\n");
        let error = assert_err!(Config::from_file(file.path()).await);
        assert!(error.to_string().contains("http"));
    }

    // ==================== Environment overrides ====================

    /// Test that environment values override file values
    #[tokio::test]
    async fn test_env_overrides_file() {
        let file = write_config("executor:\n  max_concurrent: 20\n");
        let config = assert_ok!(Config::from_file(file.path()).await);

        let purge = assert_ok!(config.purge.apply_lookup(lookup(&[
            ("TWEET_PURGE_MAX_CONCURRENT", "5"),
            ("TWEET_PURGE_TOKEN", "from-env"),
            ("TWEET_PURGE_LOG_FORMAT", "json"),
        ])));

        assert_eq!(purge.executor.max_concurrent, 5);
        assert_eq!(purge.credentials.token.as_deref(), Some("from-env"));
        assert_eq!(purge.logging.format, LogFormat::Json);
        assert!(purge.validate().is_ok());
    }

    /// Test that unparsable numbers in the environment are rejected
    #[test]
    fn test_env_invalid_number() {
        let result =
            PurgeConfig::default().apply_lookup(lookup(&[("TWEET_PURGE_BACKOFF_SECS", "soon")]));
        assert!(matches!(result, Err(PurgeError::Config(_))));
    }

    // ==================== Validation ====================

    /// Test that the default configuration validates
    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    /// Test that an invalid header name fails validation
    #[test]
    fn test_invalid_csrf_header() {
        let mut config = Config::default();
        config.purge.endpoint.csrf_header = "x csrf".to_string();
        assert!(config.validate().is_err());
    }

    /// Test that a zero wave size fails validation
    #[test]
    fn test_zero_max_concurrent() {
        let mut config = Config::default();
        config.purge.executor.max_concurrent = 0;

        let error = assert_err!(config.validate());
        assert!(error.to_string().contains("max_concurrent"));
    }

    /// Test that a zero backoff window from the environment fails validation
    #[test]
    fn test_zero_backoff_from_env() {
        let purge = assert_ok!(
            PurgeConfig::default().apply_lookup(lookup(&[("TWEET_PURGE_BACKOFF_SECS", "0")]))
        );
        assert_eq!(purge.executor.backoff_secs, 0);

        let error = assert_err!(purge.validate());
        assert!(error.to_string().contains("backoff_secs"));
    }

    /// Test that a script URL must be absolute
    #[test]
    fn test_relative_script_url() {
        let mut config = Config::default();
        config.purge.credentials.script_url = Some("/main.js".to_string());
        assert!(config.validate().is_err());
    }
}
