//! Template parsing, typed workload documents, and deployment context for Kiln.
//!
//! This crate defines the schema layer: multi-document YAML template parsing
//! (`parse_template`), the typed workload tree (`WorkloadSection`) that the
//! synthesis engine reads and rewrites, and the `DeploymentContext` describing
//! a single deploy, loadable from TOML or JSON.

pub mod context;
pub mod template;
pub mod types;
pub mod workload;

pub use context::{
    parse_context_file, parse_context_json, parse_context_str, ContextError, DeployGroupRef,
    DeploymentContext, ProjectRef, ResourceLimits, RoleRef,
};
pub use template::{parse_template, ParsedDocument, Section, TemplateError};
pub use types::{ImageReference, Revision, Tag};
pub use workload::{
    Container, EnvEntry, EnvVarSource, FieldRef, Labels, ObjectMeta, PodSpec, PodTemplate,
    WorkloadSection, WorkloadSpec,
};
