//! End-to-end resolution against real environment variables and files

use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snowsession_core::config::{
    SNOWFLAKE_ACCOUNT, SNOWFLAKE_DATABASE, SNOWFLAKE_P8_FILE, SNOWFLAKE_ROLE, SNOWFLAKE_SCHEMA,
    SNOWFLAKE_USER, SNOWFLAKE_WAREHOUSE, SNOWSQL_ACCOUNT, SNOWSQL_DATABASE,
    SNOWSQL_PRIVATE_KEY_PASSPHRASE, SNOWSQL_PWD, SNOWSQL_ROLE, SNOWSQL_SCHEMA, SNOWSQL_USER,
    SNOWSQL_WAREHOUSE,
};
use snowsession_core::session::{RecordedAuth, RecordedConfig};
use snowsession_core::{
    load_private_key, ConfigError, MockSessionBuilder, NoOpLogger, SessionError, SessionResolver,
};

const PASSPHRASE: &str = "fixture-passphrase";

const ALL_VARS: [&str; 15] = [
    SNOWFLAKE_P8_FILE,
    SNOWSQL_PRIVATE_KEY_PASSPHRASE,
    SNOWFLAKE_ACCOUNT,
    SNOWFLAKE_USER,
    SNOWFLAKE_ROLE,
    SNOWFLAKE_WAREHOUSE,
    SNOWFLAKE_DATABASE,
    SNOWFLAKE_SCHEMA,
    SNOWSQL_ACCOUNT,
    SNOWSQL_USER,
    SNOWSQL_PWD,
    SNOWSQL_ROLE,
    SNOWSQL_WAREHOUSE,
    SNOWSQL_DATABASE,
    SNOWSQL_SCHEMA,
];

const DEV_PROFILE: &str = r#"[connections.dev]
accountname = "acme"
username = "bob"
password = "secret"
rolename = "r"
warehousename = "w"
dbname = "d"
schemaname = "s"
"#;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Every relevant variable unset, then `set` applied on top
fn env_with(set: &[(&'static str, String)]) -> Vec<(&'static str, Option<String>)> {
    let mut vars: Vec<(&'static str, Option<String>)> =
        ALL_VARS.iter().map(|name| (*name, None)).collect();
    for (name, value) in set {
        if let Some(slot) = vars.iter_mut().find(|(n, _)| n == name) {
            slot.1 = Some(value.clone());
        }
    }
    vars
}

fn key_pair_vars(key_file: &Path, passphrase: &str) -> Vec<(&'static str, String)> {
    vec![
        (SNOWFLAKE_P8_FILE, key_file.display().to_string()),
        (SNOWSQL_PRIVATE_KEY_PASSPHRASE, passphrase.to_string()),
        (SNOWFLAKE_ACCOUNT, "kp-acct".to_string()),
        (SNOWFLAKE_USER, "svc".to_string()),
        (SNOWFLAKE_ROLE, "loader".to_string()),
        (SNOWFLAKE_WAREHOUSE, "etl_wh".to_string()),
        (SNOWFLAKE_DATABASE, "raw".to_string()),
        (SNOWFLAKE_SCHEMA, "public".to_string()),
    ]
}

fn password_vars() -> Vec<(&'static str, String)> {
    vec![
        (SNOWSQL_ACCOUNT, "pw-acct".to_string()),
        (SNOWSQL_USER, "alice".to_string()),
        (SNOWSQL_PWD, "hunter2".to_string()),
        (SNOWSQL_ROLE, "analyst".to_string()),
        (SNOWSQL_WAREHOUSE, "bi_wh".to_string()),
        (SNOWSQL_DATABASE, "mart".to_string()),
        (SNOWSQL_SCHEMA, "core".to_string()),
    ]
}

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn profile_path(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    fn write_profile(&self, content: &str) {
        let mut file = std::fs::File::create(self.profile_path()).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn resolver(&self, builder: &MockSessionBuilder) -> SessionResolver<MockSessionBuilder> {
        SessionResolver::new(builder.clone())
            .with_profile(self.profile_path(), "dev")
            .with_logger(Arc::new(NoOpLogger::new()))
    }
}

#[test]
fn no_credentials_anywhere() {
    let workspace = Workspace::new();
    let builder = MockSessionBuilder::new();

    temp_env::with_vars(env_with(&[]), || {
        let resolver = workspace.resolver(&builder);
        let err = resolver.get_session().unwrap_err();
        assert!(matches!(err, SessionError::NoCredentials));
        assert_eq!(err.to_string(), "Unable to create a Snowpark session");
        assert!(resolver.cached().is_none());
        assert_eq!(builder.call_count(), 0);
    });
}

#[test]
fn key_pair_session_is_built_and_cached() {
    let workspace = Workspace::new();
    let builder = MockSessionBuilder::new();
    let key_file = fixture("rsa_key.p8");
    let expected_der = load_private_key(&key_file, PASSPHRASE).unwrap().to_pkcs8_der().to_vec();

    temp_env::with_vars(env_with(&key_pair_vars(&key_file, PASSPHRASE)), || {
        let resolver = workspace.resolver(&builder);
        let session = resolver.get_session().unwrap();
        assert_eq!(session.account, "kp-acct");
        assert!(Arc::ptr_eq(&resolver.cached().unwrap(), &session));

        assert_eq!(
            builder.last_config().unwrap(),
            RecordedConfig {
                account: "kp-acct".to_string(),
                user: "svc".to_string(),
                role: "loader".to_string(),
                warehouse: "etl_wh".to_string(),
                database: "raw".to_string(),
                schema: "public".to_string(),
                auth: RecordedAuth::PrivateKey(expected_der.clone()),
            }
        );
    });
}

#[test]
fn profile_session_uses_translated_fields() {
    let workspace = Workspace::new();
    workspace.write_profile(DEV_PROFILE);
    let builder = MockSessionBuilder::new();

    temp_env::with_vars(env_with(&password_vars()), || {
        let resolver = workspace.resolver(&builder);
        resolver.get_session().unwrap();

        assert_eq!(
            builder.configs(),
            vec![RecordedConfig {
                account: "acme".to_string(),
                user: "bob".to_string(),
                role: "r".to_string(),
                warehouse: "w".to_string(),
                database: "d".to_string(),
                schema: "s".to_string(),
                auth: RecordedAuth::Password("secret".to_string()),
            }]
        );
    });
}

#[test]
fn profile_without_section_reports_generic_error() {
    let workspace = Workspace::new();
    workspace.write_profile("[connections.prod]\naccountname = acme\n");
    let builder = MockSessionBuilder::new();

    temp_env::with_vars(env_with(&password_vars()), || {
        let err = workspace.resolver(&builder).get_session().unwrap_err();

        assert_eq!(err.to_string(), "Error getting snowsql config details");
        let SessionError::Config(config) = &err else {
            panic!("expected a config error, got {err:?}");
        };
        assert!(matches!(config, ConfigError::Profile { .. }));
        assert!(config.source().unwrap().to_string().contains("connections.dev"));
        // An active profile that fails does not fall back to the password variables
        assert_eq!(builder.call_count(), 0);
    });
}

#[test]
fn password_env_is_the_last_resort() {
    let workspace = Workspace::new();
    let builder = MockSessionBuilder::new();

    temp_env::with_vars(env_with(&password_vars()), || {
        let session = workspace.resolver(&builder).get_session().unwrap();
        assert_eq!(session.account, "pw-acct");
        assert_eq!(
            builder.last_config().unwrap().auth,
            RecordedAuth::Password("hunter2".to_string())
        );
    });
}

#[test]
fn key_pair_takes_precedence_over_profile() {
    let workspace = Workspace::new();
    // Unparseable: consulting the profile would fail the call
    workspace.write_profile("not an ini file\n");
    let builder = MockSessionBuilder::new();

    let mut vars = key_pair_vars(&fixture("rsa_key.p8"), PASSPHRASE);
    vars.extend(password_vars());
    temp_env::with_vars(env_with(&vars), || {
        let session = workspace.resolver(&builder).get_session().unwrap();
        assert_eq!(session.account, "kp-acct");
        assert!(matches!(
            builder.last_config().unwrap().auth,
            RecordedAuth::PrivateKey(_)
        ));
    });
}

#[test]
fn bad_key_does_not_fall_back() {
    let workspace = Workspace::new();
    workspace.write_profile(DEV_PROFILE);
    let builder = MockSessionBuilder::new();

    let mut vars = key_pair_vars(&fixture("rsa_key.p8"), "wrong-passphrase");
    vars.extend(password_vars());
    temp_env::with_vars(env_with(&vars), || {
        let resolver = workspace.resolver(&builder);
        let err = resolver.get_session().unwrap_err();
        assert!(matches!(err, SessionError::KeyFormat(_)));
        assert_eq!(builder.call_count(), 0);
        assert!(resolver.cached().is_none());
    });
}

#[test]
fn missing_key_file_is_an_io_error() {
    let workspace = Workspace::new();
    let builder = MockSessionBuilder::new();
    let missing = workspace.dir.path().join("absent.p8");

    temp_env::with_vars(env_with(&key_pair_vars(&missing, PASSPHRASE)), || {
        let err = workspace.resolver(&builder).get_session().unwrap_err();
        match err {
            SessionError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    });
}

#[test]
fn cached_session_survives_environment_changes() {
    let workspace = Workspace::new();
    let builder = MockSessionBuilder::new();

    let resolver = temp_env::with_vars(env_with(&password_vars()), || {
        let resolver = workspace.resolver(&builder);
        resolver.get_session().unwrap();
        resolver
    });
    let first = resolver.cached().unwrap();

    // Sources are not consulted again once a session is cached
    temp_env::with_vars(env_with(&[]), || {
        for _ in 0..3 {
            let again = resolver.get_session().unwrap();
            assert!(Arc::ptr_eq(&first, &again));
        }
    });
    assert_eq!(builder.call_count(), 1);
}

#[test]
fn rejected_credentials_surface_as_session_creation_error() {
    let workspace = Workspace::new();
    workspace.write_profile(DEV_PROFILE);
    let builder = MockSessionBuilder::failing("Incorrect username or password was specified.");

    temp_env::with_vars(env_with(&[]), || {
        let resolver = workspace.resolver(&builder);
        let err = resolver.get_session().unwrap_err();
        assert!(matches!(err, SessionError::SessionCreation { .. }));
        assert_eq!(
            err.source().unwrap().to_string(),
            "Incorrect username or password was specified."
        );
        assert!(resolver.cached().is_none());
    });
}

#[test]
fn des3_encrypted_key_is_supported() {
    let workspace = Workspace::new();
    let builder = MockSessionBuilder::new();
    let key_file = fixture("rsa_key_des3.p8");
    let expected_der = load_private_key(fixture("rsa_key.p8"), PASSPHRASE)
        .unwrap()
        .to_pkcs8_der()
        .to_vec();

    temp_env::with_vars(env_with(&key_pair_vars(&key_file, PASSPHRASE)), || {
        let session = workspace.resolver(&builder).get_session().unwrap();
        assert_eq!(session.account, "kp-acct");
        assert_eq!(
            builder.last_config().unwrap().auth,
            RecordedAuth::PrivateKey(expected_der)
        );
    });
}

#[test]
fn scrypt_encrypted_key_is_supported() {
    let workspace = Workspace::new();
    let builder = MockSessionBuilder::new();

    temp_env::with_vars(env_with(&key_pair_vars(&fixture("rsa_key_scrypt.p8"), PASSPHRASE)), || {
        workspace.resolver(&builder).get_session().unwrap();
        assert!(matches!(
            builder.last_config().unwrap().auth,
            RecordedAuth::PrivateKey(_)
        ));
    });
}
