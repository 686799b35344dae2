pub mod completions;
pub mod context;
pub mod man_pages;
pub mod render;
pub mod validate;

use kiln_core::{synthesize, Manifest};
use kiln_schema::{parse_context_file, DeploymentContext};
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_TEMPLATE_ERROR: u8 = 2;
pub const EXIT_CONTEXT_ERROR: u8 = 3;
pub const EXIT_IMAGE_MISSING: u8 = 4;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Map an error message to the process exit code.
pub fn exit_code_for(msg: &str) -> u8 {
    if msg.starts_with("template error:") {
        EXIT_TEMPLATE_ERROR
    } else if msg.starts_with("failed to read context")
        || msg.starts_with("failed to parse context")
        || msg.starts_with("context field")
    {
        EXIT_CONTEXT_ERROR
    } else if msg.starts_with("image missing:") {
        EXIT_IMAGE_MISSING
    } else {
        EXIT_FAILURE
    }
}

pub fn load_context(path: &Path) -> Result<DeploymentContext, String> {
    parse_context_file(path).map_err(|e| e.to_string())
}

pub fn read_template(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read template {}: {e}", path.display()))
}

/// Load both inputs and run the synthesis pipeline.
///
/// When the context does not name its template, the template path is used so
/// that validation errors point at the file that was passed in.
pub fn render_manifest(template: &Path, context: &Path) -> Result<Manifest, String> {
    let mut ctx = load_context(context)?;
    if ctx.role.config_file.is_none() {
        ctx.role.config_file = Some(template.display().to_string());
    }
    let raw = read_template(template)?;
    synthesize(&raw, &ctx).map_err(|e| e.to_string())
}
