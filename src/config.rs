//! Configuration module
//!
//! This module handles loading piar configuration from TOML files and
//! resolving it together with the environment into run [`Settings`].

pub mod loader;
pub mod schema;
pub mod settings;

// Re-export public types and functions
pub use schema::{Config, GithubConfig, RepositoryConfig, TemplateConfig};
pub use settings::Settings;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::branch::ListingMode;
    use crate::domain::pipeline::{DESCRIPTION, TICKET};
    use crate::domain::question::{AnswerRecord, AnswerValue, QuestionKind};
    use crate::error::PiarError;
    use serial_test::serial;
    use std::fs;

    const ALL_ENV: [&str; 7] = [
        "PIAR_OWNER",
        "PIAR_REPO",
        "PIAR_GITHUB_TOKEN",
        "GITHUB_TOKEN",
        "GH_TOKEN",
        "PIAR_CONFIG",
        "XDG_CONFIG_HOME",
    ];

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let values: Vec<(&str, Option<&str>)> = ALL_ENV
            .iter()
            .map(|name| {
                let value = vars
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| *value);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(values, f);
    }

    fn missing_item(err: &anyhow::Error) -> Option<&'static str> {
        match err.downcast_ref::<PiarError>() {
            Some(PiarError::MissingConfiguration(item)) => Some(*item),
            _ => None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.repository.owner.is_none());
        assert_eq!(config.branches.source, ListingMode::Remote);
        assert_eq!(config.branches.remote, "origin");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert!(config.template.ticket_url.contains("{ticket}"));
        assert!(config.questions.is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            [repository]
            owner = "acme"
            name = "widgets"

            [branches]
            source = "local"

            [github]
            api_url = "https://github.example.com/api/v3"

            [template]
            ticket_url = "https://jira.example.com/browse/{ticket}"
            title = "{ticket}: {description}"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.repository.owner.as_deref(), Some("acme"));
        assert_eq!(config.repository.name.as_deref(), Some("widgets"));
        assert_eq!(config.branches.source, ListingMode::Local);
        assert_eq!(config.branches.remote, "origin");
        assert_eq!(config.github.api_url, "https://github.example.com/api/v3");
        assert_eq!(
            config.template.title.as_deref(),
            Some("{ticket}: {description}")
        );
    }

    #[test]
    fn test_questions_from_toml() {
        let toml = r#"
            [[questions]]
            kind = "text"
            key = "summary"
            message = "Summary"

            [[questions]]
            kind = "multiselect"
            key = "areas"
            message = "Affected areas"
            default = ["api"]
            choices = [
                { label = "API", value = "api" },
                { label = "UI", value = "ui" },
            ]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let questions = config.questions.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].kind, QuestionKind::MultiSelect);
        assert_eq!(
            questions[1].default,
            Some(AnswerValue::List(vec!["api".to_string()]))
        );
    }

    #[test]
    fn test_invalid_listing_source() {
        let toml = r#"
            [branches]
            source = "both"
        "#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_from_file_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("piar.toml");
        fs::write(&path, "[repository]\nowner = \"acme\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.resolve_path(std::path::Path::new("body.md")),
            dir.path().join("body.md")
        );
    }

    #[test]
    fn test_from_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("piar.toml");
        fs::write(&path, "[repository\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    #[serial]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[repository]\nname = \"widgets\"\n").unwrap();

        with_env(&[("PIAR_CONFIG", path.to_str().unwrap())], || {
            let config = Config::load().unwrap();
            assert_eq!(config.repository.name.as_deref(), Some("widgets"));
        });
    }

    #[test]
    #[serial]
    fn test_load_missing_explicit_config() {
        with_env(&[("PIAR_CONFIG", "/nonexistent/piar.toml")], || {
            let err = Config::load().unwrap_err();
            assert_eq!(missing_item(&err), Some("config file (PIAR_CONFIG)"));
        });
    }

    #[test]
    #[serial]
    fn test_load_without_config_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let xdg = dir.path().to_str().unwrap();

        // No .piar.toml in the crate root and an empty XDG directory
        with_env(&[("XDG_CONFIG_HOME", xdg)], || {
            let config = Config::load().unwrap();
            assert!(config.source.is_none());
            assert!(config.repository.owner.is_none());
            assert_eq!(config.branches.remote, "origin");
        });
    }

    #[test]
    #[serial]
    fn test_global_config_path_respects_xdg() {
        with_env(&[("XDG_CONFIG_HOME", "/tmp/xdg")], || {
            assert_eq!(
                Config::global_config_path(),
                Some(std::path::PathBuf::from("/tmp/xdg/piar/config.toml"))
            );
        });
    }

    #[test]
    #[serial]
    fn test_global_config_path_ignores_relative_xdg() {
        with_env(&[("XDG_CONFIG_HOME", "relative/dir")], || {
            let path = Config::global_config_path();
            if let Some(path) = path {
                assert!(path.ends_with(".config/piar/config.toml"));
            }
        });
    }

    #[test]
    #[serial]
    fn test_settings_from_env() {
        with_env(
            &[
                ("PIAR_OWNER", "acme"),
                ("PIAR_REPO", "widgets"),
                ("GITHUB_TOKEN", "ghp_test"),
            ],
            || {
                let settings = Settings::resolve(Config::default()).unwrap();
                assert_eq!(settings.owner, "acme");
                assert_eq!(settings.repo, "widgets");
                assert_eq!(settings.token, "ghp_test");
                assert_eq!(settings.api_url, "https://api.github.com");
                assert!(settings.questions.is_none());
            },
        );
    }

    #[test]
    #[serial]
    fn test_settings_env_overrides_config() {
        let config: Config =
            toml::from_str("[repository]\nowner = \"from-config\"\nname = \"repo\"\n").unwrap();

        with_env(&[("PIAR_OWNER", "from-env"), ("GH_TOKEN", "gh")], || {
            let settings = Settings::resolve(config).unwrap();
            assert_eq!(settings.owner, "from-env");
            assert_eq!(settings.repo, "repo");
            assert_eq!(settings.token, "gh");
        });
    }

    #[test]
    #[serial]
    fn test_settings_missing_owner() {
        with_env(&[("PIAR_REPO", "widgets"), ("GITHUB_TOKEN", "t")], || {
            let err = Settings::resolve(Config::default()).err().unwrap();
            assert_eq!(missing_item(&err), Some("repository owner (PIAR_OWNER)"));
        });
    }

    #[test]
    #[serial]
    fn test_settings_missing_repo() {
        with_env(&[("PIAR_OWNER", "acme"), ("GITHUB_TOKEN", "t")], || {
            let err = Settings::resolve(Config::default()).err().unwrap();
            assert_eq!(missing_item(&err), Some("repository name (PIAR_REPO)"));
        });
    }

    #[test]
    #[serial]
    fn test_settings_missing_token() {
        with_env(&[("PIAR_OWNER", "acme"), ("PIAR_REPO", "widgets")], || {
            let err = Settings::resolve(Config::default()).err().unwrap();
            assert_eq!(
                missing_item(&err),
                Some("GitHub token (PIAR_GITHUB_TOKEN or GITHUB_TOKEN)")
            );
        });
    }

    #[test]
    #[serial]
    fn test_settings_piar_token() {
        with_env(
            &[
                ("PIAR_OWNER", "acme"),
                ("PIAR_REPO", "widgets"),
                ("PIAR_GITHUB_TOKEN", "ghp_piar"),
            ],
            || {
                let settings = Settings::resolve(Config::default()).unwrap();
                assert_eq!(settings.token, "ghp_piar");
            },
        );
    }

    #[test]
    #[serial]
    fn test_settings_piar_token_wins() {
        with_env(
            &[
                ("PIAR_OWNER", "acme"),
                ("PIAR_REPO", "widgets"),
                ("PIAR_GITHUB_TOKEN", "ghp_piar"),
                ("GITHUB_TOKEN", "ghp_github"),
                ("GH_TOKEN", "ghp_gh"),
            ],
            || {
                let settings = Settings::resolve(Config::default()).unwrap();
                assert_eq!(settings.token, "ghp_piar");
            },
        );
    }

    #[test]
    #[serial]
    fn test_settings_blank_value_is_missing() {
        with_env(
            &[
                ("PIAR_OWNER", "acme"),
                ("PIAR_REPO", "  "),
                ("GITHUB_TOKEN", "t"),
            ],
            || {
                let err = Settings::resolve(Config::default()).err().unwrap();
                assert_eq!(missing_item(&err), Some("repository name (PIAR_REPO)"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_settings_rejects_reserved_question_key() {
        let config: Config = toml::from_str(
            r#"
            [[questions]]
            kind = "text"
            key = "base"
            message = "Base"
            "#,
        )
        .unwrap();

        with_env(
            &[
                ("PIAR_OWNER", "acme"),
                ("PIAR_REPO", "widgets"),
                ("GITHUB_TOKEN", "t"),
            ],
            || {
                let err = Settings::resolve(config).err().unwrap();
                assert!(format!("{err:#}").contains("reserved"));
            },
        );
    }

    #[test]
    #[serial]
    fn test_settings_body_template_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("body.md"), "Summary: {description}\n").unwrap();
        let path = dir.path().join("piar.toml");
        fs::write(
            &path,
            "[template]\nbody_file = \"body.md\"\ntitle = \"{ticket} {description}\"\n",
        )
        .unwrap();
        let config = Config::from_file(&path).unwrap();

        with_env(
            &[
                ("PIAR_OWNER", "acme"),
                ("PIAR_REPO", "widgets"),
                ("GITHUB_TOKEN", "t"),
            ],
            || {
                let settings = Settings::resolve(config).unwrap();
                let answers = AnswerRecord::new()
                    .with(DESCRIPTION, AnswerValue::text("Add login"))
                    .with(TICKET, AnswerValue::text("ABC-1"));
                assert_eq!(
                    settings.renderer.render_body(&answers),
                    "Summary: Add login\n"
                );
                assert_eq!(settings.renderer.render_title(&answers), "ABC-1 Add login");
            },
        );
    }

    #[test]
    #[serial]
    fn test_settings_missing_body_template_file() {
        let config: Config = toml::from_str("[template]\nbody_file = \"/nonexistent/body.md\"\n")
            .unwrap();

        with_env(
            &[
                ("PIAR_OWNER", "acme"),
                ("PIAR_REPO", "widgets"),
                ("GITHUB_TOKEN", "t"),
            ],
            || {
                let err = Settings::resolve(config).err().unwrap();
                assert!(err.to_string().contains("Failed to read body template"));
            },
        );
    }
}
