//! Life-pillar inference from task titles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Life-domain tag used to group dashboard tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Body,
    Mind,
    Spirit,
    Business,
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Pillar::Body => "body",
            Pillar::Mind => "mind",
            Pillar::Spirit => "spirit",
            Pillar::Business => "business",
        };
        f.write_str(s)
    }
}

/// Keyword classifier over the task title. Total: anything unmatched falls
/// through to `Business`.
pub fn infer_pillar(title: &str) -> Pillar {
    let lower = title.to_lowercase();
    let has = |kw: &str| lower.contains(kw);

    if has("treino") || has("correr") || has("workout") {
        Pillar::Body
    } else if has("ler") || has("estudar") || has("curso") {
        Pillar::Mind
    } else if has("meditar") || has("meditação") {
        Pillar::Spirit
    } else {
        Pillar::Business
    }
}
