use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named climate problem that can be pushed into the globe's visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    GlobalWarming,
    OceanAcidification,
    Deforestation,
    IceMelting,
    Pollution,
}

impl IssueKind {
    pub const ALL: [IssueKind; 5] = [
        IssueKind::GlobalWarming,
        IssueKind::OceanAcidification,
        IssueKind::Deforestation,
        IssueKind::IceMelting,
        IssueKind::Pollution,
    ];

    /// Canonical snake_case identifier.
    pub fn id(self) -> &'static str {
        match self {
            IssueKind::GlobalWarming => "global_warming",
            IssueKind::OceanAcidification => "ocean_acidification",
            IssueKind::Deforestation => "deforestation",
            IssueKind::IceMelting => "ice_melting",
            IssueKind::Pollution => "pollution",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            IssueKind::GlobalWarming => "Global Warming",
            IssueKind::OceanAcidification => "Ocean Acidification",
            IssueKind::Deforestation => "Deforestation",
            IssueKind::IceMelting => "Ice Melting",
            IssueKind::Pollution => "Air Pollution",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown climate issue: {0}")]
pub struct ParseIssueError(pub String);

impl FromStr for IssueKind {
    type Err = ParseIssueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global_warming" => Ok(IssueKind::GlobalWarming),
            "ocean_acidification" => Ok(IssueKind::OceanAcidification),
            "deforestation" => Ok(IssueKind::Deforestation),
            "ice_melting" => Ok(IssueKind::IceMelting),
            "pollution" | "air_pollution" => Ok(IssueKind::Pollution),
            _ => Err(ParseIssueError(s.to_string())),
        }
    }
}
