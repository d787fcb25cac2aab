//! End-to-end pipeline test using the built-in adapters: a JSON file vault
//! feeding a template transformation whose output lands in a file sink.

use secretpipe::{validation, BuiltinFactory, Config, Orchestrator};
use tokio_util::sync::CancellationToken;

fn config_yaml(store: &str, url_out: &str, raw_out: &str) -> String {
    format!(
        r#"
vaults:
  - name: local-store
    type: file
    spec:
      path: {store}

secrets:
  - name: username
    vault: local-store
    type: secret
  - name: password
    vault: local-store
    type: secret

transformations:
  - in: [username, password]
    out: db-url
    type: template
    spec:
      template: "postgres://{{{{ username }}}}:{{{{ password }}}}@db:5432/app"

sinks:
  - type: file
    var: db-url
    spec:
      path: {url_out}
      mode: "0600"
  - type: file
    var: password
    spec:
      path: {raw_out}
"#
    )
}

#[tokio::test]
async fn test_file_vault_template_and_file_sink() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let url_out = dir.path().join("db-url");
    let raw_out = dir.path().join("password");

    std::fs::write(&store, r#"{"username": "app", "password": "hunter2"}"#).unwrap();

    let yaml = config_yaml(
        store.to_str().unwrap(),
        url_out.to_str().unwrap(),
        raw_out.to_str().unwrap(),
    );
    let config = Config::from_yaml(&yaml).unwrap();

    let factory = BuiltinFactory::new();
    validation::validate(&config, &factory).unwrap();

    Orchestrator::new()
        .process_config(&CancellationToken::new(), &factory, &config)
        .await
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&url_out).unwrap(),
        "postgres://app:hunter2@db:5432/app"
    );
    assert_eq!(std::fs::read_to_string(&raw_out).unwrap(), "hunter2");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&url_out).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        // No explicit mode on the second sink, so the default applies.
        let mode = std::fs::metadata(&raw_out).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o400);
    }
}

#[tokio::test]
async fn test_env_substitution_resolves_store_path() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let out = dir.path().join("token");
    std::fs::write(&store, r#"{"token": "abc123"}"#).unwrap();

    std::env::set_var("SECRETPIPE_E2E_STORE", store.to_str().unwrap());

    let yaml = format!(
        r#"
vaults:
  - name: local-store
    type: file
    spec:
      path: ${{SECRETPIPE_E2E_STORE}}

secrets:
  - name: token
    vault: local-store
    type: secret

sinks:
  - type: file
    var: token
    spec:
      path: {}
"#,
        out.to_str().unwrap()
    );

    let config = Config::from_yaml_with_env_subst(&yaml).unwrap();
    assert_eq!(
        config.vaults[0].spec.get("path").and_then(|v| v.as_str()),
        store.to_str()
    );

    let factory = BuiltinFactory::new();
    validation::validate(&config, &factory).unwrap();

    Orchestrator::new()
        .process_config(&CancellationToken::new(), &factory, &config)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "abc123");
}

#[tokio::test]
async fn test_json_pointer_extraction_through_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let out = dir.path().join("api-key");

    // The stored secret is itself a JSON document.
    std::fs::write(
        &store,
        r#"{"service-account": "{\"credentials\": {\"api_key\": \"k-123\"}}"}"#,
    )
    .unwrap();

    let yaml = format!(
        r#"
vaults:
  - name: local-store
    type: file
    spec:
      path: {}

secrets:
  - name: service-account
    vault: local-store
    type: secret

transformations:
  - in: [service-account]
    out: api-key
    type: json
    spec:
      pointer: /credentials/api_key
      raw: true

sinks:
  - type: file
    var: api-key
    spec:
      path: {}
"#,
        store.to_str().unwrap(),
        out.to_str().unwrap()
    );

    let config = Config::from_yaml(&yaml).unwrap();
    let factory = BuiltinFactory::new();
    validation::validate(&config, &factory).unwrap();

    Orchestrator::new()
        .process_config(&CancellationToken::new(), &factory, &config)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(&out).unwrap(), "k-123");
}

#[tokio::test]
async fn test_validation_rejects_unknown_adapter_types() {
    let yaml = r#"
vaults:
  - name: remote
    type: consul

secrets:
  - name: token
    vault: remote
    type: secret

sinks:
  - type: file
    var: token
    spec:
      path: /tmp/token
"#;

    let config = Config::from_yaml(yaml).unwrap();
    let err = validation::validate(&config, &BuiltinFactory::new()).unwrap_err();
    assert!(err.to_string().contains("consul"));
}

#[tokio::test]
async fn test_missing_secret_in_store_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("store.json");
    let out = dir.path().join("out");
    std::fs::write(&store, r#"{"other": "value"}"#).unwrap();

    let yaml = format!(
        r#"
vaults:
  - name: local-store
    type: file
    spec:
      path: {}

secrets:
  - name: token
    vault: local-store
    type: secret

sinks:
  - type: file
    var: token
    spec:
      path: {}
"#,
        store.to_str().unwrap(),
        out.to_str().unwrap()
    );

    let config = Config::from_yaml(&yaml).unwrap();
    let factory = BuiltinFactory::new();
    validation::validate(&config, &factory).unwrap();

    let err = Orchestrator::new()
        .process_config(&CancellationToken::new(), &factory, &config)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("token"));
    assert!(!out.exists());
}
