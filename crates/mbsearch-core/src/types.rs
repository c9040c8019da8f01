//! Entity kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A top-level searchable entity, each with its own field set and index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A distinct recorded performance.
    Recording,
    /// A person, group, or other credited performer.
    Artist,
    /// A concrete release (edition) of a release group.
    Release,
    /// A group of releases of the same album, single, etc.
    ReleaseGroup,
    /// A folksonomy tag.
    Tag,
}

impl EntityKind {
    /// Every entity kind, in indexing order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Artist,
        EntityKind::ReleaseGroup,
        EntityKind::Release,
        EntityKind::Recording,
        EntityKind::Tag,
    ];

    /// Short lowercase name used in index directory names and log lines.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Recording => "recording",
            EntityKind::Artist => "artist",
            EntityKind::Release => "release",
            EntityKind::ReleaseGroup => "releasegroup",
            EntityKind::Tag => "tag",
        }
    }

    /// Directory name of this entity's index under the index root.
    pub fn index_dir_name(self) -> String {
        format!("{}_index", self.name())
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config(format!("unknown entity kind '{s}'")))
    }
}
