use super::{json_pretty, load_context, EXIT_SUCCESS};
use kiln_core::{injected_env, labels, LabelScope, DEFAULT_POD_FIELDS};
use std::path::Path;

pub fn run(context: &Path, json: bool) -> Result<u8, String> {
    let ctx = load_context(context)?;
    let pod_labels = labels(&ctx, LabelScope::PodTemplate);
    let top_labels = labels(&ctx, LabelScope::TopLevel);
    let env = injected_env(&ctx, &DEFAULT_POD_FIELDS);

    if json {
        let payload = serde_json::json!({
            "namespace": ctx.namespace(),
            "image": ctx.image,
            "pod_labels": pod_labels,
            "top_labels": top_labels,
            "env": env,
        });
        println!("{}", json_pretty(&payload)?);
        return Ok(EXIT_SUCCESS);
    }

    println!("namespace:   {}", ctx.namespace());
    println!(
        "image:       {}",
        ctx.image.as_deref().unwrap_or("(unresolved)")
    );
    println!("pod labels:");
    for (k, v) in &pod_labels {
        println!("  {k}={v}");
    }
    println!("top-level labels:");
    for (k, v) in &top_labels {
        println!("  {k}={v}");
    }
    println!("env:");
    for entry in &env {
        match (&entry.value, &entry.value_from) {
            (Some(value), _) => println!("  {}={value}", entry.name),
            (None, Some(source)) => {
                let path = source
                    .field_ref
                    .as_ref()
                    .map_or("?", |f| f.field_path.as_str());
                println!("  {}=<{path}>", entry.name);
            }
            (None, None) => println!("  {}", entry.name),
        }
    }
    Ok(EXIT_SUCCESS)
}
