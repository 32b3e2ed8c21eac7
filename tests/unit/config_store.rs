//! Unit tests for loading the YAML configuration file.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use cert_deploy::application::ports::ConfigStore;
use cert_deploy::domain::{LayoutMode, ServiceAction, TargetLayout};
use cert_deploy::infra::config::YamlConfigStore;

fn store_with(content: &str) -> (tempfile::TempDir, YamlConfigStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).expect("write config");
    (dir, YamlConfigStore::with_path(path))
}

#[test]
fn test_load_full_config() {
    let (_dir, store) = store_with(
        "proxy:\n  binary: /usr/sbin/haproxy\n  config_path: /srv/haproxy.cfg\n  service: haproxy-edge\n  \
         service_action: reload\n  verify_active: false\n\
         target:\n  base_dir: /srv/certs\n  layout: split\n  cert_template: '{domain}/cert.pem'\n  \
         key_template: '{domain}/key.pem'\n\
         timeouts:\n  validate_secs: 5\n  reload_secs: 20\n",
    );

    let config = store.load().expect("load");

    assert_eq!(config.proxy.binary, "/usr/sbin/haproxy");
    assert_eq!(config.proxy.service_action, ServiceAction::Reload);
    assert!(!config.proxy.verify_active);
    assert_eq!(config.target.layout, LayoutMode::Split);
    assert_eq!(config.timeouts.validate_timeout().as_secs(), 5);
    let layout = config.layout().expect("layout");
    assert!(matches!(layout, TargetLayout::SplitCertKey { .. }));
    let paths: Vec<PathBuf> = layout.files("example.com").into_iter().map(|f| f.path).collect();
    assert_eq!(
        paths,
        vec![
            PathBuf::from("/srv/certs/example.com/cert.pem"),
            PathBuf::from("/srv/certs/example.com/key.pem"),
        ]
    );
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let (_dir, store) = store_with("target:\n  base_dir: /srv/certs\n");

    let config = store.load().expect("load");

    assert_eq!(config.proxy.service, "haproxy");
    assert_eq!(config.target.layout, LayoutMode::Combined);
    assert_eq!(
        config.layout().expect("layout").files("example.com")[0].path,
        PathBuf::from("/srv/certs/example.com.pem")
    );
}

#[test]
fn test_load_rejects_zero_timeout() {
    let (_dir, store) = store_with("timeouts:\n  reload_secs: 0\n");

    let err = store.load().expect_err("must fail");

    assert!(format!("{err:#}").contains("timeouts.reload_secs"));
}

#[test]
fn test_load_missing_file_names_path() {
    let store = YamlConfigStore::with_path(PathBuf::from("/nonexistent/cert-deploy.yaml"));

    let err = store.load().expect_err("must fail");

    assert!(err.to_string().contains("/nonexistent/cert-deploy.yaml"));
}
