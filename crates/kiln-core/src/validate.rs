use kiln_schema::{ParsedDocument, WorkloadSection};
use thiserror::Error;
use tracing::{debug, warn};

/// Kinds counted as the workload section of a template.
pub const SUPPORTED_WORKLOAD_KINDS: [&str; 2] = ["Deployment", "DaemonSet"];

/// Shape problems in a template. All of these are fixed by editing the template.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{template} has {count} Deployment sections, having 1 section is valid")]
    WorkloadCount { template: String, count: usize },
    #[error("{template} has {count} containers, having 1 section is valid")]
    ContainerCount { template: String, count: usize },
    #[error("{template} has a {kind} section without spec.selector, a selector is required")]
    MissingSelector { template: String, kind: String },
    #[error("{template} has an invalid {kind} section: {reason}")]
    InvalidWorkload {
        template: String,
        kind: String,
        reason: String,
    },
}

/// Extract the single workload section of `doc`.
///
/// `template` names the template in error messages. More than one container is
/// accepted, but only the first one is rewritten later on.
pub fn validate(doc: &ParsedDocument, template: &str) -> Result<WorkloadSection, ValidationError> {
    let workloads: Vec<_> = doc.sections_of_kind(&SUPPORTED_WORKLOAD_KINDS).collect();
    let [section] = workloads.as_slice() else {
        return Err(ValidationError::WorkloadCount {
            template: template.to_owned(),
            count: workloads.len(),
        });
    };
    let kind = section.kind.clone().unwrap_or_default();

    let workload = section
        .to_workload()
        .map_err(|e| ValidationError::InvalidWorkload {
            template: template.to_owned(),
            kind: kind.clone(),
            reason: e.to_string(),
        })?;

    let containers = workload.containers().len();
    if containers == 0 {
        return Err(ValidationError::ContainerCount {
            template: template.to_owned(),
            count: containers,
        });
    }
    if containers > 1 {
        warn!(
            "{template} has {containers} containers, only the first receives the image and env"
        );
    }

    if workload.spec.selector.is_none() {
        return Err(ValidationError::MissingSelector {
            template: template.to_owned(),
            kind,
        });
    }

    debug!("{template}: validated {kind} section with {containers} container(s)");
    Ok(workload)
}
