//! Manifest synthesis engine for Kiln.
//!
//! This crate turns a parsed deploy template plus a `DeploymentContext` into a
//! complete workload manifest: structural validation of the template, kind
//! specific augmentation (replicas, rolling-update key), label and environment
//! injection, and digest-pinned image substitution. Every step is a pure
//! function over borrowed inputs; `synthesize` chains them.

pub mod assemble;
pub mod engine;
pub mod env;
pub mod image;
pub mod kind;
pub mod labels;
pub mod validate;

#[cfg(test)]
mod testutil;

pub use assemble::{assemble, Manifest, TypeMeta};
pub use engine::synthesize;
pub use env::{injected_env, merge_env, PodField, DEFAULT_POD_FIELDS};
pub use image::substitute_image;
pub use kind::{adapt, resource_name, KindTraits, UNIQUE_LABEL_KEY};
pub use labels::{labels, merge_labels, LabelScope};
pub use validate::{validate, ValidationError, SUPPORTED_WORKLOAD_KINDS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("template error: {0}")]
    MalformedTemplate(#[from] kiln_schema::TemplateError),
    #[error("template error: {0}")]
    User(#[from] ValidationError),
    #[error("image missing: no resolved image for container {container}")]
    ImageMissing { container: String },
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SynthesisError {
    /// Whether the template author can fix this by editing the template.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::MalformedTemplate(_) | Self::User(_))
    }
}
