//! End-to-end synthesis tests over a realistic template and context.

use kiln_core::{synthesize, SynthesisError, ValidationError};
use kiln_schema::{parse_context_str, DeploymentContext, EnvEntry};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

const IMAGE: &str = "docker-registry.example.com/test@sha256:5f1d7c7381b2e45ca73216d7b06004fdb0908ed7bb8786b62f2cdfa5035fde2c";

const TEMPLATE: &str = r"---
kind: Deployment
metadata:
  name: test-app-server
spec:
  replicas: 1
  selector:
    matchLabels:
      project: foo
      role: app_server
  template:
    metadata:
      labels:
        pre_defined: foobar
    spec:
      containers:
      - {}
---
kind: Service
metadata:
  name: test-app-server
spec:
  ports:
  - port: 80
";

fn context() -> DeploymentContext {
    parse_context_str(&format!(
        r#"
revision = "1a6f551a2ffa6d88e15eef5461384da0bfb1c194"
tag = "v123"
release_id = 7
deploy_id = 123
image = "{IMAGE}"
replica_target = 3

[project]
id = 1
name = "foo"

[role]
id = 2
name = "app_server"
config_file = "kubernetes/app_server.yml"

[deploy_group]
id = 3
name = "pod1"

[resources]
cpu = 1.0
ram_mb = 100
"#
    ))
    .unwrap()
}

fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn env_names(env: &[EnvEntry]) -> Vec<&str> {
    let mut names: Vec<_> = env.iter().map(|e| e.name.as_str()).collect();
    names.sort_unstable();
    names
}

fn user_message(err: SynthesisError) -> String {
    match err {
        SynthesisError::User(e) => e.to_string(),
        other => panic!("expected a user error, got {other}"),
    }
}

#[test]
fn synthesizes_complete_deployment() {
    let manifest = synthesize(TEMPLATE, &context()).unwrap();

    let value = manifest.to_value().unwrap();
    assert_eq!(value.as_mapping().unwrap().len(), 3);

    assert_eq!(
        manifest.spec.unique_label_key.as_deref(),
        Some("rc_unique_identifier")
    );
    assert_eq!(manifest.spec.replicas, Some(3));

    assert_eq!(
        manifest.pod_labels().unwrap(),
        &labels(&[
            ("revision", "1a6f551a2ffa6d88e15eef5461384da0bfb1c194"),
            ("tag", "v123"),
            ("pre_defined", "foobar"),
            ("release_id", "7"),
            ("project", "foo"),
            ("project_id", "1"),
            ("role_id", "2"),
            ("role", "app_server"),
            ("deploy_group", "pod1"),
            ("deploy_group_id", "3"),
            ("deploy_id", "123"),
        ])
    );

    assert_eq!(manifest.metadata.namespace.as_deref(), Some("pod1"));
    assert_eq!(
        manifest.metadata.labels,
        labels(&[
            ("project_id", "1"),
            ("revision", "1a6f551a2ffa6d88e15eef5461384da0bfb1c194"),
            ("tag", "v123"),
            ("deploy_id", "123"),
            ("project", "foo"),
            ("role", "app_server"),
            ("deploy_group", "pod1"),
        ])
    );

    let container = &manifest.containers()[0];
    assert_eq!(container.image.as_deref(), Some(IMAGE));
    let resources = container.resources.as_ref().unwrap();
    assert_eq!(resources["limits"]["memory"], Value::from("100Mi"));
    assert_eq!(resources["limits"]["cpu"], Value::from(1.0));

    let mut expected = vec![
        "REVISION",
        "TAG",
        "PROJECT",
        "ROLE",
        "DEPLOY_ID",
        "DEPLOY_GROUP",
        "POD_NAME",
        "POD_NAMESPACE",
        "POD_IP",
    ];
    expected.sort_unstable();
    assert_eq!(env_names(container.env()), expected);
}

#[test]
fn api_version_is_passed_through() {
    let raw = TEMPLATE.replacen("kind: Deployment", "apiVersion: apps/v1\nkind: Deployment", 1);
    let manifest = synthesize(&raw, &context()).unwrap();
    assert_eq!(manifest.type_meta.api_version.as_deref(), Some("apps/v1"));
    let value = manifest.to_value().unwrap();
    assert_eq!(value["apiVersion"], Value::from("apps/v1"));
    assert_eq!(value["kind"], Value::from("Deployment"));
}

#[test]
fn daemon_set_has_no_replicas_key() {
    let raw = TEMPLATE.replacen("kind: Deployment", "kind: DaemonSet", 1);
    let manifest = synthesize(&raw, &context()).unwrap();
    assert_eq!(manifest.resource_name(), "daemon_set");

    let value = manifest.to_value().unwrap();
    assert!(value.get("replicas").is_none());
    assert!(value["spec"].get("replicas").is_none());
    assert!(!manifest.to_yaml().unwrap().contains("replicas"));
    assert!(!manifest.to_json().unwrap().contains("replicas"));
}

#[test]
fn fails_without_selector() {
    let raw = TEMPLATE.replacen("selector:", "no_selector:", 1);
    let err = synthesize(&raw, &context()).unwrap_err();
    assert!(user_message(err).contains("selector"));
}

#[test]
fn fails_when_deployment_section_is_missing() {
    let raw = TEMPLATE.replacen("Deployment", "Foobar", 1);
    let err = synthesize(&raw, &context()).unwrap_err();
    assert!(user_message(err).contains("has 0 Deployment sections, having 1 section is valid"));
}

#[test]
fn fails_when_multiple_deployment_sections_are_present() {
    let raw = format!("{TEMPLATE}\n{TEMPLATE}");
    let err = synthesize(&raw, &context()).unwrap_err();
    assert!(user_message(err).contains("has 2 Deployment sections, having 1 section is valid"));
}

#[test]
fn fails_without_containers() {
    let raw = TEMPLATE.replacen("      containers:\n      - {}\n", "", 1);
    let err = synthesize(&raw, &context()).unwrap_err();
    assert!(user_message(err).contains("has 0 containers, having 1 section is valid"));
}

#[test]
fn allows_multiple_containers_but_only_rewrites_the_first() {
    let raw = TEMPLATE.replacen(
        "containers:\n      - {}",
        "containers:\n      - {}\n      - {}",
        1,
    );
    let manifest = synthesize(&raw, &context()).unwrap();
    let containers = manifest.containers();
    assert_eq!(containers.len(), 2);
    assert_eq!(containers[0].image.as_deref(), Some(IMAGE));
    assert_eq!(containers[1].image, None);
    assert!(containers[1].env.is_none());
}

#[test]
fn merges_existing_env_settings() {
    let raw = TEMPLATE.replacen(
        "      - {}",
        "      - env:\n        - name: Foo\n          value: Bar\n        - name: REVISION\n          value: mine",
        1,
    );
    let manifest = synthesize(&raw, &context()).unwrap();
    let env = manifest.containers()[0].env();
    let names = env_names(env);
    assert!(names.contains(&"Foo"));
    assert!(names.len() > 5);
    assert_eq!(env.iter().filter(|e| e.name == "REVISION").count(), 1);
    assert_eq!(env[1].value.as_deref(), Some("mine"));
}

#[test]
fn malformed_template_is_reported() {
    let err = synthesize("kind: Deployment\n  spec: [", &context()).unwrap_err();
    assert!(matches!(err, SynthesisError::MalformedTemplate(_)));
}

#[test]
fn missing_image_is_reported() {
    let mut ctx = context();
    ctx.image = None;
    let err = synthesize(TEMPLATE, &ctx).unwrap_err();
    assert!(matches!(err, SynthesisError::ImageMissing { .. }));
}

#[test]
fn validation_errors_carry_counts() {
    let err = synthesize("kind: Service\n", &context()).unwrap_err();
    match err {
        SynthesisError::User(ValidationError::WorkloadCount { template, count }) => {
            assert_eq!(template, "template kubernetes/app_server.yml");
            assert_eq!(count, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn raw_template_is_left_untouched() {
    let raw = TEMPLATE.to_owned();
    let _ = synthesize(&raw, &context()).unwrap();
    assert_eq!(raw, TEMPLATE);
}

#[test]
fn concurrent_synthesis_is_independent() {
    let ctx = Arc::new(context());
    let expected = synthesize(TEMPLATE, &ctx).unwrap();

    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let mut local = (*ctx).clone();
                local.deploy_id += i;
                synthesize(TEMPLATE, &local).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let manifest = handle.join().unwrap();
        assert_eq!(
            manifest.metadata.labels["deploy_id"],
            (123 + i as u64).to_string()
        );
        if i == 0 {
            assert_eq!(manifest, expected);
        }
    }
}
