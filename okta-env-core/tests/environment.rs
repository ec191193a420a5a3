use okta_env_core::{ConfigError, ConfigValue, Environment, StaticLayer, SystemEnvironmentSource};
use serial_test::serial;

#[test]
fn test_empty_environment() {
    let env = Environment::empty();
    assert!(env.get::<String>("nonexistent").is_err());
    assert!(env.source_names().is_empty());
}

#[test]
fn test_get_or_default() {
    let env = Environment::empty();
    assert_eq!(env.get_or("missing", 42i64), 42);
}

#[test]
fn test_yaml_values_and_types() {
    let yaml = r#"
okta:
  oauth2:
    issuer: "https://example.okta.com"
    discovery:
      timeout-secs: 5
    scopes:
      - openid
      - profile
"#;
    let env = Environment::from_yaml_str(yaml, "test").unwrap();
    assert_eq!(env.get::<String>("okta.oauth2.issuer").unwrap(), "https://example.okta.com");
    assert_eq!(env.get::<u64>("okta.oauth2.discovery.timeout-secs").unwrap(), 5);
    assert_eq!(
        env.get::<Vec<String>>("okta.oauth2.scopes").unwrap(),
        vec!["openid", "profile"]
    );
    assert_eq!(env.get::<String>("okta.oauth2.scopes.0").unwrap(), "openid");
}

#[test]
fn test_first_source_wins() {
    let mut env = Environment::empty();
    env.add_last(StaticLayer::new("low").with("app.name", "low"));
    env.add_first(StaticLayer::new("high").with("app.name", "high"));
    env.add_last(StaticLayer::new("lowest").with("app.other", "x"));

    assert_eq!(env.source_names(), vec!["high", "low", "lowest"]);
    assert_eq!(env.get::<String>("app.name").unwrap(), "high");
    assert_eq!(env.get::<String>("app.other").unwrap(), "x");
}

#[test]
fn test_placeholders_resolve_at_read_time() {
    let mut env = Environment::empty();
    env.add_last(StaticLayer::new("templates").with("app.url", "${app.host}/api"));
    assert!(matches!(
        env.get_resolved::<String>("app.url"),
        Err(ConfigError::Placeholder(_))
    ));

    // A source added after the template still feeds it.
    env.add_last(StaticLayer::new("hosts").with("app.host", "https://example.com"));
    assert_eq!(env.get_resolved::<String>("app.url").unwrap(), "https://example.com/api");
    assert_eq!(env.get::<String>("app.url").unwrap(), "${app.host}/api");
}

#[test]
fn test_nested_placeholders() {
    let mut env = Environment::empty();
    env.add_last(
        StaticLayer::new("nested")
            .with("a", "${b}/a")
            .with("b", "${c}/b")
            .with("c", "root"),
    );
    assert_eq!(env.get_resolved::<String>("a").unwrap(), "root/b/a");
}

#[test]
fn test_circular_placeholders_are_an_error() {
    let mut env = Environment::empty();
    env.add_last(StaticLayer::new("loop").with("a", "${b}").with("b", "${a}"));
    assert!(matches!(
        env.get_resolved::<String>("a"),
        Err(ConfigError::Placeholder(_))
    ));
}

#[test]
fn test_list_placeholder_joins_with_commas() {
    let mut env = Environment::empty();
    env.add_last(
        StaticLayer::new("lists")
            .with("scopes", ConfigValue::string_list(["openid", "email"]))
            .with("joined", "${scopes}"),
    );
    assert_eq!(env.get_resolved::<String>("joined").unwrap(), "openid,email");
}

#[test]
fn test_get_optional() {
    let mut env = Environment::empty();
    env.add_last(StaticLayer::new("s").with("present", "yes").with("broken", "${missing}"));
    assert_eq!(env.get_optional::<String>("present").unwrap().as_deref(), Some("yes"));
    assert_eq!(env.get_optional::<String>("absent").unwrap(), None);
    assert!(env.get_optional::<String>("broken").is_err());
}

#[test]
fn test_system_environment_source_relaxed_binding() {
    let mut env = Environment::empty();
    env.add_last(SystemEnvironmentSource::from_vars([(
        "OKTA_OAUTH2_CLIENT_ID",
        "from-env",
    )]));
    env.add_last(StaticLayer::new("yaml").with("okta.oauth2.client-id", "from-yaml"));
    assert_eq!(env.get::<String>("okta.oauth2.client-id").unwrap(), "from-env");
}

#[test]
#[serial]
fn test_load_from_directory_with_profile() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "okta:\n  oauth2:\n    issuer: https://base.okta.com\n    client-id: base\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-prod.yaml"),
        "okta:\n  oauth2:\n    client-id: prod\n",
    )
    .unwrap();

    unsafe { std::env::remove_var("OKTA_ENV_PROFILE") };
    let env = Environment::load_from(dir.path(), "prod").unwrap();

    assert_eq!(env.profile(), "prod");
    assert_eq!(env.source_names()[0], SystemEnvironmentSource::NAME);
    assert_eq!(env.get::<String>("okta.oauth2.client-id").unwrap(), "prod");
    assert_eq!(env.get::<String>("okta.oauth2.issuer").unwrap(), "https://base.okta.com");
}

#[test]
#[serial]
fn test_env_vars_override_yaml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "okta:\n  oauth2:\n    client-secret: from-yaml\n",
    )
    .unwrap();

    unsafe { std::env::set_var("OKTA_OAUTH2_CLIENT_SECRET", "from-env") };
    let env = Environment::load_from(dir.path(), "dev").unwrap();
    unsafe { std::env::remove_var("OKTA_OAUTH2_CLIENT_SECRET") };

    assert_eq!(env.get::<String>("okta.oauth2.client-secret").unwrap(), "from-env");
}

#[test]
#[serial]
fn test_dotenv_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "OKTA_ENV_TEST_DOTENV_ISSUER=https://dotenv.okta.com\n")
        .unwrap();

    let env = Environment::load_from(dir.path(), "dev").unwrap();
    unsafe { std::env::remove_var("OKTA_ENV_TEST_DOTENV_ISSUER") };

    assert_eq!(
        env.get::<String>("okta.env.test.dotenv.issuer").unwrap(),
        "https://dotenv.okta.com"
    );
}

#[test]
fn test_invalid_yaml_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application.yaml"), "okta: [unclosed").unwrap();
    assert!(matches!(
        Environment::load_from(dir.path(), "dev"),
        Err(ConfigError::Load(_))
    ));
}
