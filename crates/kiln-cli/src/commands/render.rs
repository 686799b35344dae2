use super::{json_pretty, render_manifest, EXIT_SUCCESS};
use std::path::Path;

pub fn run(
    template: &Path,
    context: &Path,
    output: Option<&Path>,
    json: bool,
) -> Result<u8, String> {
    let manifest = render_manifest(template, context)?;
    let rendered = if json {
        manifest.to_json()
    } else {
        manifest.to_yaml()
    }
    .map_err(|e| e.to_string())?;

    let Some(path) = output else {
        if json {
            println!("{rendered}");
        } else {
            print!("{rendered}");
        }
        return Ok(EXIT_SUCCESS);
    };

    std::fs::write(path, &rendered)
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    if json {
        let payload = serde_json::json!({
            "status": "written",
            "resource": manifest.resource_name(),
            "path": path.display().to_string(),
        });
        println!("{}", json_pretty(&payload)?);
    } else {
        println!("wrote {} to {}", manifest.resource_name(), path.display());
    }
    Ok(EXIT_SUCCESS)
}
