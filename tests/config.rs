// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, file discovery, and override layering.

use deploy_wait::config::*;
use deploy_wait::poll::{DuplicatePolicy, InactivePolicy};
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.max_timeout, Duration::from_secs(600));
        assert_eq!(config.check_interval, Duration::from_secs(60));
        assert_eq!(config.confirm_interval, Duration::from_secs(30));
        assert_eq!(config.initial_delay, Duration::ZERO);
        assert_eq!(config.required_checks, 3);
        assert!(config.environment_filter.is_none());
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.duplicates, DuplicatePolicy::Dedupe);
        assert_eq!(config.on_inactive, InactivePolicy::StopCycle);
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
max_timeout: 15m
check_interval: 10s
confirm_interval: 1m
initial_delay: 5s
required_checks: 5
environment_filter: "^(prod|staging)$"
api_url: https://github.example.com/api/v3
duplicates: keep
on_inactive: skip
"#;
        let config = Config::from_yaml(yaml).unwrap();

        assert_eq!(config.max_timeout, Duration::from_secs(900));
        assert_eq!(config.check_interval, Duration::from_secs(10));
        assert_eq!(config.confirm_interval, Duration::from_secs(60));
        assert_eq!(config.initial_delay, Duration::from_secs(5));
        assert_eq!(config.required_checks, 5);
        let filter = config.environment_filter.unwrap();
        assert!(filter.matches("prod"));
        assert!(!filter.matches("preview"));
        assert_eq!(config.api_url, "https://github.example.com/api/v3");
        assert_eq!(config.duplicates, DuplicatePolicy::Keep);
        assert_eq!(config.on_inactive, InactivePolicy::Skip);
    }

    #[test]
    fn unknown_key_returns_error() {
        let result = Config::from_yaml("max_timout: 5m\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn invalid_duration_returns_error() {
        assert!(Config::from_yaml("check_interval: soon\n").is_err());
    }

    #[test]
    fn invalid_filter_returns_error() {
        let err = Config::from_yaml("environment_filter: \"prod(\"\n").unwrap_err();
        assert!(err.to_string().contains("prod("));
    }

    #[test]
    fn unknown_policy_returns_error() {
        let err = Config::from_yaml("on_inactive: explode\n").unwrap_err();
        assert!(err.to_string().contains("explode"));
    }
}

mod filter {
    use super::*;

    #[test]
    fn full_match_needs_both_anchors() {
        let filter = EnvironmentFilter::new("^prod$").unwrap();
        assert!(filter.matches("prod"));
        assert!(!filter.matches("production"));
    }

    #[test]
    fn invalid_pattern_names_the_pattern() {
        let err = EnvironmentFilter::new("[").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFilter { ref pattern, .. } if pattern == "["));
    }
}

mod files {
    use super::*;
    use std::fs;

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yml");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn discover_without_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::discover(dir.path()).unwrap().is_none());
    }

    #[test]
    fn discover_finds_root_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "required_checks: 2\n").unwrap();

        let config = Config::discover(dir.path()).unwrap().unwrap();
        assert_eq!(config.required_checks, 2);
    }

    #[test]
    fn discover_finds_github_dir_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".github")).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_DIR), "required_checks: 4\n").unwrap();

        let config = Config::discover(dir.path()).unwrap().unwrap();
        assert_eq!(config.required_checks, 4);
    }

    #[test]
    fn root_file_wins_over_github_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".github")).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), "required_checks: 7\n").unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_DIR), "required_checks: 4\n").unwrap();

        let config = Config::discover(dir.path()).unwrap().unwrap();
        assert_eq!(config.required_checks, 7);
    }

    #[test]
    fn discover_reports_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "required_checks: [\n").unwrap();
        assert!(Config::discover(dir.path()).is_err());
    }
}

mod overrides {
    use super::*;

    #[test]
    fn overrides_apply_over_file() {
        let config = Config::from_yaml("max_timeout: 15m\nrequired_checks: 5\n")
            .unwrap()
            .with_overrides(ConfigOverrides {
                max_timeout: Some(Duration::from_secs(60)),
                duplicates: Some(DuplicatePolicy::Keep),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(config.max_timeout, Duration::from_secs(60));
        assert_eq!(config.required_checks, 5);
        assert_eq!(config.duplicates, DuplicatePolicy::Keep);
    }

    #[test]
    fn blank_api_url_keeps_default() {
        let config = Config::default()
            .with_overrides(ConfigOverrides {
                api_url: Some("  ".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(config.api_url, "https://api.github.com");
    }

    #[test]
    fn non_http_api_url_is_rejected() {
        let err = Config::default()
            .with_overrides(ConfigOverrides {
                api_url: Some("ftp://example.com".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn invalid_filter_override_is_rejected() {
        let err = Config::default()
            .with_overrides(ConfigOverrides {
                environment_filter: Some("(".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFilter { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::default()
            .with_overrides(ConfigOverrides {
                max_timeout: Some(Duration::ZERO),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.to_string().contains("max_timeout"));
    }
}

mod token {
    use super::*;

    #[test]
    fn token_is_trimmed_and_redacted() {
        let token: Token = "  ghp_secret\n".parse().unwrap();
        assert_eq!(token.expose(), "ghp_secret");
        assert!(!format!("{token:?}").contains("ghp_secret"));
    }

    #[test]
    fn blank_token_is_empty() {
        assert!(Token::new("   ".to_string()).is_empty());
    }
}
