use crate::kind::{resource_name, KindTraits, UNIQUE_LABEL_KEY};
use crate::labels::merge_labels;
use crate::SynthesisError;
use kiln_schema::{
    Container, DeploymentContext, EnvEntry, Labels, ObjectMeta, ResourceLimits, WorkloadSection,
    WorkloadSpec,
};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub kind: String,
}

/// A fully populated workload, ready to be serialized and applied.
///
/// Three parts: type metadata (flattened into `apiVersion`/`kind` on output),
/// object `metadata`, and `spec`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Manifest {
    #[serde(flatten)]
    pub type_meta: TypeMeta,
    pub metadata: ObjectMeta,
    pub spec: WorkloadSpec,
}

impl Manifest {
    pub fn kind(&self) -> &str {
        &self.type_meta.kind
    }

    /// snake_case resource name, e.g. `deployment` or `daemon_set`.
    pub fn resource_name(&self) -> String {
        resource_name(&self.type_meta.kind)
    }

    pub fn containers(&self) -> &[Container] {
        self.spec
            .template
            .as_ref()
            .and_then(|t| t.spec.as_ref())
            .and_then(|s| s.containers.as_deref())
            .unwrap_or_default()
    }

    pub fn pod_labels(&self) -> Option<&Labels> {
        self.spec.template.as_ref().map(|t| &t.metadata.labels)
    }

    pub fn to_value(&self) -> Result<Value, SynthesisError> {
        serde_yaml::to_value(self).map_err(|e| SynthesisError::Serialization(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, SynthesisError> {
        serde_yaml::to_string(self).map_err(|e| SynthesisError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, SynthesisError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SynthesisError::Serialization(e.to_string()))
    }
}

/// Build the output manifest from a validated section.
///
/// `primary` is the first container with its image already substituted; it
/// receives `merged_env` and, when the context carries them, resource limits.
/// Any further containers are copied unchanged. `section` is not modified.
pub fn assemble(
    section: &WorkloadSection,
    traits: KindTraits,
    pod_labels: &Labels,
    top_labels: &Labels,
    merged_env: Vec<EnvEntry>,
    primary: Container,
    ctx: &DeploymentContext,
) -> Manifest {
    let metadata = ObjectMeta {
        namespace: Some(ctx.namespace().to_owned()),
        labels: merge_labels(&section.metadata.labels, top_labels),
        ..section.metadata.clone()
    };

    let mut spec = section.spec.clone();
    match traits {
        KindTraits::Scalable => {
            spec.unique_label_key = Some(UNIQUE_LABEL_KEY.to_owned());
            spec.replicas = Some(ctx.replica_target);
        }
        KindTraits::PerNode => spec.replicas = None,
        KindTraits::Opaque => {}
    }

    let mut template = spec.template.take().unwrap_or_default();
    template.metadata.labels = merge_labels(&template.metadata.labels, pod_labels);

    let mut pod_spec = template.spec.take().unwrap_or_default();
    let mut containers = pod_spec.containers.take().unwrap_or_default();
    let mut primary = Container {
        env: Some(merged_env),
        ..primary
    };
    if let Some(limits) = ctx.resources {
        primary.resources = Some(with_limits(primary.resources.take(), limits));
    }
    match containers.first_mut() {
        Some(first) => *first = primary,
        None => containers.push(primary),
    }

    pod_spec.containers = Some(containers);
    template.spec = Some(pod_spec);
    spec.template = Some(template);

    Manifest {
        type_meta: TypeMeta {
            api_version: section.api_version.clone(),
            kind: section.kind.clone(),
        },
        metadata,
        spec,
    }
}

/// Set `limits` on a container's resources, keeping `requests` and anything else.
fn with_limits(resources: Option<Value>, limits: ResourceLimits) -> Value {
    let mut rendered = Mapping::new();
    rendered.insert(
        Value::from("memory"),
        Value::from(format!("{}Mi", limits.ram_mb)),
    );
    rendered.insert(Value::from("cpu"), Value::from(limits.cpu));

    let mut out = match resources {
        Some(Value::Mapping(existing)) => existing,
        _ => Mapping::new(),
    };
    out.insert(Value::from("limits"), Value::Mapping(rendered));
    Value::Mapping(out)
}
