//! Newtype wrappers for string values carried by a deployment context.
//!
//! All newtypes serialize/deserialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }
    };
}

string_newtype!(
    /// Source commit identifier the release was built from.
    Revision
);

string_newtype!(
    /// Human-readable version string of a release, e.g. `v123`.
    Tag
);

string_newtype!(
    /// Fully-qualified container image reference, normally pinned to a digest
    /// (`registry/repo@sha256:<hex>`).
    ImageReference
);

impl ImageReference {
    /// Whether the reference names a content digest rather than a mutable tag.
    pub fn is_digest_pinned(&self) -> bool {
        match self.0.rsplit_once('@') {
            Some((repo, digest)) => {
                !repo.is_empty()
                    && digest
                        .split_once(':')
                        .is_some_and(|(algo, hex)| !algo.is_empty() && !hex.is_empty())
            }
            None => false,
        }
    }
}
