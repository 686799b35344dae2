use crate::assemble::{assemble, Manifest};
use crate::env::{merge_env, DEFAULT_POD_FIELDS};
use crate::image::substitute_image;
use crate::kind::adapt;
use crate::labels::{labels, LabelScope};
use crate::validate::{validate, ValidationError};
use crate::SynthesisError;
use kiln_schema::{parse_template, DeploymentContext};
use tracing::{debug, info};

/// Turn a raw deploy template into a complete manifest for one deploy.
///
/// Pure and synchronous: `raw` and `ctx` are only read, nothing is cached, and
/// concurrent calls share no state. Any failure aborts the whole call.
pub fn synthesize(raw: &str, ctx: &DeploymentContext) -> Result<Manifest, SynthesisError> {
    let template = ctx.template_source();
    let doc = parse_template(raw)?;
    debug!("{template}: parsed {} section(s)", doc.len());

    let section = validate(&doc, &template)?;
    let traits = adapt(&section.kind);
    debug!("{template}: {} treated as {traits:?}", section.kind);

    let Some(first) = section.containers().first() else {
        return Err(ValidationError::ContainerCount { template, count: 0 }.into());
    };
    let pod_labels = labels(ctx, LabelScope::PodTemplate);
    let top_labels = labels(ctx, LabelScope::TopLevel);
    let merged_env = merge_env(first.env(), ctx, &DEFAULT_POD_FIELDS);
    let primary = substitute_image(first, ctx.image.as_ref())?;

    let manifest = assemble(
        &section,
        traits,
        &pod_labels,
        &top_labels,
        merged_env,
        primary,
        ctx,
    );
    info!(
        "synthesized {} for {}/{} (deploy {})",
        manifest.resource_name(),
        ctx.project.name,
        ctx.deploy_group.name,
        ctx.deploy_id
    );
    Ok(manifest)
}
