use kiln_schema::{DeploymentContext, Labels};

/// Which object a label set is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScope {
    /// `spec.template.metadata.labels`; also what selectors match against.
    PodTemplate,
    /// `metadata.labels` of the workload object itself.
    TopLevel,
}

/// Labels derived from the deploy. Numeric ids are rendered in decimal.
pub fn labels(ctx: &DeploymentContext, scope: LabelScope) -> Labels {
    let mut out = Labels::new();
    out.insert("revision".to_owned(), ctx.revision.to_string());
    out.insert("tag".to_owned(), ctx.tag.to_string());
    out.insert("project".to_owned(), ctx.project.name.clone());
    out.insert("project_id".to_owned(), ctx.project.id.to_string());
    out.insert("role".to_owned(), ctx.role.name.clone());
    out.insert("deploy_group".to_owned(), ctx.deploy_group.name.clone());
    out.insert("deploy_id".to_owned(), ctx.deploy_id.to_string());

    if scope == LabelScope::PodTemplate {
        out.insert("release_id".to_owned(), ctx.release_id.to_string());
        out.insert("role_id".to_owned(), ctx.role.id.to_string());
        out.insert("deploy_group_id".to_owned(), ctx.deploy_group.id.to_string());
    }
    out
}

/// Overlay `derived` onto labels the template author wrote. Derived values win
/// on collision; every other user label is kept.
pub fn merge_labels(user: &Labels, derived: &Labels) -> Labels {
    let mut out = user.clone();
    out.extend(derived.iter().map(|(k, v)| (k.clone(), v.clone())));
    out
}
