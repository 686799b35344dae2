use crate::types::{ImageReference, Revision, Tag};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to read context file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse context: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("failed to parse context: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("context field {0} must not be empty")]
    EmptyField(&'static str),
}

/// Everything known about a single deploy of one role to one deploy group.
///
/// Built by the caller (or loaded from a file by the CLI) and only read by the
/// synthesis engine.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeploymentContext {
    pub project: ProjectRef,
    pub role: RoleRef,
    pub deploy_group: DeployGroupRef,
    pub revision: Revision,
    pub tag: Tag,
    pub release_id: u64,
    pub deploy_id: u64,
    /// Digest-pinned image resolved by the build pipeline.
    #[serde(default)]
    pub image: Option<ImageReference>,
    #[serde(default = "default_replica_target")]
    pub replica_target: u32,
    #[serde(default)]
    pub resources: Option<ResourceLimits>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RoleRef {
    pub id: u64,
    pub name: String,
    /// Path of the template this role deploys, used in error messages.
    #[serde(default)]
    pub config_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DeployGroupRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub env_value: Option<String>,
}

/// Per-container limits; rendered as `memory: "<ram_mb>Mi"` and `cpu: <cpu>`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResourceLimits {
    pub cpu: f64,
    pub ram_mb: u64,
}

fn default_replica_target() -> u32 {
    1
}

impl DeploymentContext {
    /// Namespace the workload is deployed into. Falls back to the deploy group name.
    pub fn namespace(&self) -> &str {
        self.deploy_group
            .namespace
            .as_deref()
            .unwrap_or(&self.deploy_group.name)
    }

    /// Value exported as `DEPLOY_GROUP`. Falls back to the deploy group name.
    pub fn deploy_group_env_value(&self) -> &str {
        self.deploy_group
            .env_value
            .as_deref()
            .unwrap_or(&self.deploy_group.name)
    }

    /// How the template is referred to in user-facing errors.
    pub fn template_source(&self) -> String {
        match &self.role.config_file {
            Some(file) => format!("template {file}"),
            None => "template".to_owned(),
        }
    }

    pub fn validate(&self) -> Result<(), ContextError> {
        let required: [(&'static str, &str); 5] = [
            ("project.name", &self.project.name),
            ("role.name", &self.role.name),
            ("deploy_group.name", &self.deploy_group.name),
            ("revision", self.revision.as_str()),
            ("tag", self.tag.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ContextError::EmptyField(field));
            }
        }
        if let Some(ns) = &self.deploy_group.namespace {
            if ns.trim().is_empty() {
                return Err(ContextError::EmptyField("deploy_group.namespace"));
            }
        }
        if let Some(image) = &self.image {
            if image.trim().is_empty() {
                return Err(ContextError::EmptyField("image"));
            }
        }
        Ok(())
    }
}

pub fn parse_context_str(input: &str) -> Result<DeploymentContext, ContextError> {
    let ctx: DeploymentContext = toml::from_str(input)?;
    ctx.validate()?;
    Ok(ctx)
}

pub fn parse_context_json(input: &str) -> Result<DeploymentContext, ContextError> {
    let ctx: DeploymentContext = serde_json::from_str(input)?;
    ctx.validate()?;
    Ok(ctx)
}

/// Load a context file; `.json` files are read as JSON, anything else as TOML.
pub fn parse_context_file(path: impl AsRef<Path>) -> Result<DeploymentContext, ContextError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_context_json(&content)
    } else {
        parse_context_str(&content)
    }
}
