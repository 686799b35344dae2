//! Shared fixtures for unit tests.

use kiln_schema::{DeployGroupRef, DeploymentContext, ProjectRef, RoleRef};

pub const IMAGE: &str = "docker-registry.example.com/test@sha256:5f1d7c7381b2e45ca73216d7b06004fdb0908ed7bb8786b62f2cdfa5035fde2c";

pub const TEMPLATE: &str = r"---
kind: Deployment
metadata:
  name: test-app-server
spec:
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

pub fn context() -> DeploymentContext {
    DeploymentContext {
        project: ProjectRef {
            id: 11,
            name: "foo".to_owned(),
        },
        role: RoleRef {
            id: 22,
            name: "app_server".to_owned(),
            config_file: None,
        },
        deploy_group: DeployGroupRef {
            id: 33,
            name: "pod1".to_owned(),
            namespace: None,
            env_value: None,
        },
        revision: "1a6f551a2ffa6d88e15eef5461384da0bfb1c194".into(),
        tag: "v123".into(),
        release_id: 44,
        deploy_id: 123,
        image: Some(IMAGE.into()),
        replica_target: 2,
        resources: None,
    }
}
