use super::{json_pretty, render_manifest, EXIT_SUCCESS};
use std::path::Path;

pub fn run(template: &Path, context: &Path, json: bool) -> Result<u8, String> {
    let manifest = render_manifest(template, context)?;
    let containers = manifest.containers().len();
    if json {
        let payload = serde_json::json!({
            "status": "ok",
            "kind": manifest.kind(),
            "resource": manifest.resource_name(),
            "namespace": manifest.metadata.namespace,
            "containers": containers,
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!(
            "ok: {} in namespace {} ({containers} container{})",
            manifest.resource_name(),
            manifest.metadata.namespace.as_deref().unwrap_or("(none)"),
            if containers == 1 { "" } else { "s" }
        );
    }
    Ok(EXIT_SUCCESS)
}
