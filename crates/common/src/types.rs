use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one configured polling target.
///
/// All durable state (checkpoints, credentials) is scoped to this
/// kind/name pair. Instances never share state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId {
    pub kind: String,
    pub name: String,
}

impl InstanceId {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Filesystem-safe stem for per-instance state files.
    pub fn file_stem(&self) -> String {
        format!("{}-{}", sanitize(&self.kind), sanitize(&self.name))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.kind, self.name)
    }
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
