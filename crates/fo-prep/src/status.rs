// status.rs — ProjectStatus: the coarse project lifecycle.
//
// Codes are the scheduling board's abbreviations. PV90, UB and WB are
// pre-work stages; WIP is installation in progress; QF is the final
// inspection.
//
// Normal flow:
//   PV90 → UB → WB → WIP → QF → Completed
//   (PV90 and UB may skip straight to WB or WIP; QF may bounce back to WIP)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrepError;

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    #[serde(rename = "PV90")]
    Pv90,
    #[serde(rename = "UB")]
    Ub,
    #[serde(rename = "WB")]
    Wb,
    #[serde(rename = "WIP")]
    Wip,
    #[serde(rename = "QF")]
    Qf,
    Completed,
}

impl ProjectStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [ProjectStatus; 6] = [
        ProjectStatus::Pv90,
        ProjectStatus::Ub,
        ProjectStatus::Wb,
        ProjectStatus::Wip,
        ProjectStatus::Qf,
        ProjectStatus::Completed,
    ];

    /// The board code for this status.
    pub fn code(&self) -> &'static str {
        match self {
            ProjectStatus::Pv90 => "PV90",
            ProjectStatus::Ub => "UB",
            ProjectStatus::Wb => "WB",
            ProjectStatus::Wip => "WIP",
            ProjectStatus::Qf => "QF",
            ProjectStatus::Completed => "Completed",
        }
    }

    /// Whether the project is still in its preparation stage.
    pub fn is_preparation(&self) -> bool {
        matches!(
            self,
            ProjectStatus::Pv90 | ProjectStatus::Ub | ProjectStatus::Wb
        )
    }

    /// Check whether moving from this status to `next` is allowed.
    pub fn can_transition_to(&self, next: ProjectStatus) -> bool {
        matches!(
            (self, next),
            (ProjectStatus::Pv90, ProjectStatus::Ub)
                | (ProjectStatus::Pv90, ProjectStatus::Wb)
                | (ProjectStatus::Ub, ProjectStatus::Wb)
                | (ProjectStatus::Pv90, ProjectStatus::Wip)
                | (ProjectStatus::Ub, ProjectStatus::Wip)
                | (ProjectStatus::Wb, ProjectStatus::Wip)
                | (ProjectStatus::Wip, ProjectStatus::Qf)
                | (ProjectStatus::Qf, ProjectStatus::Completed)
                // Failed inspection sends the crew back in.
                | (ProjectStatus::Qf, ProjectStatus::Wip)
        )
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ProjectStatus {
    type Err = PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ProjectStatus::ALL
            .into_iter()
            .find(|status| status.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| PrepError::UnknownStatus(s.to_string()))
    }
}
