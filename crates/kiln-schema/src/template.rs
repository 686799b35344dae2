use crate::workload::WorkloadSection;
use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to parse template: {0}")]
    Malformed(#[from] serde_yaml::Error),
}

/// One YAML document of a template stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: Option<String>,
    pub value: Value,
}

impl Section {
    /// Read this section as a typed workload. The section itself is left untouched.
    pub fn to_workload(&self) -> Result<WorkloadSection, serde_yaml::Error> {
        serde_yaml::from_value(self.value.clone())
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }
}

/// A raw template split into its documents, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    sections: Vec<Section>,
}

impl ParsedDocument {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections whose `kind` is one of `kinds`.
    pub fn sections_of_kind<'a>(
        &'a self,
        kinds: &'a [&'a str],
    ) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections
            .iter()
            .filter(move |s| kinds.iter().any(|k| s.is_kind(k)))
    }
}

/// Parse a multi-document YAML template. Null documents (a bare `---`) are skipped.
pub fn parse_template(raw: &str) -> Result<ParsedDocument, TemplateError> {
    let mut sections = Vec::new();
    for document in serde_yaml::Deserializer::from_str(raw) {
        let value = Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        let kind = value.get("kind").and_then(Value::as_str).map(str::to_owned);
        sections.push(Section { kind, value });
    }
    Ok(ParsedDocument { sections })
}
