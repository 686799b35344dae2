/// Label key the rolling-update mechanism uses to tell replica generations apart.
pub const UNIQUE_LABEL_KEY: &str = "rc_unique_identifier";

/// Kind-specific behaviour of a workload section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTraits {
    /// `Deployment`: carries a replica count and the rolling-update key.
    Scalable,
    /// `DaemonSet`: one pod per node, so `replicas` must not appear at all.
    PerNode,
    /// Anything else. Passed through without augmentation.
    Opaque,
}

impl KindTraits {
    pub fn has_replicas(self) -> bool {
        matches!(self, Self::Scalable)
    }

    pub fn has_unique_label_key(self) -> bool {
        matches!(self, Self::Scalable)
    }

    pub fn unique_label_key(self) -> Option<&'static str> {
        self.has_unique_label_key().then_some(UNIQUE_LABEL_KEY)
    }
}

pub fn adapt(kind: &str) -> KindTraits {
    match kind {
        "Deployment" => KindTraits::Scalable,
        "DaemonSet" => KindTraits::PerNode,
        _ => KindTraits::Opaque,
    }
}

/// snake_case form of a kind name, e.g. `DaemonSet` -> `daemon_set`.
pub fn resource_name(kind: &str) -> String {
    let mut out = String::with_capacity(kind.len() + 4);
    for (i, ch) in kind.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
