use kiln_schema::{DeploymentContext, EnvEntry};

/// Pod fields exposed to the container through the downward API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PodField {
    Name,
    Namespace,
    Ip,
}

impl PodField {
    pub fn env_name(self) -> &'static str {
        match self {
            Self::Name => "POD_NAME",
            Self::Namespace => "POD_NAMESPACE",
            Self::Ip => "POD_IP",
        }
    }

    pub fn field_path(self) -> &'static str {
        match self {
            Self::Name => "metadata.name",
            Self::Namespace => "metadata.namespace",
            Self::Ip => "status.podIP",
        }
    }
}

pub const DEFAULT_POD_FIELDS: [PodField; 3] = [PodField::Name, PodField::Namespace, PodField::Ip];

/// Entries derived from the deploy, in fixed order. Pod field references come
/// last and in `DEFAULT_POD_FIELDS` order, whatever order `pod_fields` uses.
pub fn injected_env(ctx: &DeploymentContext, pod_fields: &[PodField]) -> Vec<EnvEntry> {
    let mut out = vec![
        EnvEntry::literal("REVISION", ctx.revision.as_str()),
        EnvEntry::literal("TAG", ctx.tag.as_str()),
        EnvEntry::literal("PROJECT", ctx.project.name.as_str()),
        EnvEntry::literal("ROLE", ctx.role.name.as_str()),
        EnvEntry::literal("DEPLOY_ID", ctx.deploy_id.to_string()),
        EnvEntry::literal("DEPLOY_GROUP", ctx.deploy_group_env_value()),
    ];
    out.extend(
        DEFAULT_POD_FIELDS
            .into_iter()
            .filter(|f| pod_fields.contains(f))
            .map(|f| EnvEntry::field_ref(f.env_name(), f.field_path())),
    );
    out
}

/// Existing entries first, untouched and in order, then every injected entry
/// whose name the user has not already declared.
pub fn merge_env(
    existing: &[EnvEntry],
    ctx: &DeploymentContext,
    pod_fields: &[PodField],
) -> Vec<EnvEntry> {
    let mut out = existing.to_vec();
    out.extend(
        injected_env(ctx, pod_fields)
            .into_iter()
            .filter(|entry| !existing.iter().any(|e| e.name == entry.name)),
    );
    out
}
