//! Tool aggregate root and availability status.

use super::{ParseToolStatusError, Title, ToolId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability status of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// The tool is free for new work.
    Available,
    /// The tool is occupied by at least one active task.
    InUse,
    /// The tool has at least one open issue against it.
    Maintenance,
}

impl ToolStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::Maintenance => "maintenance",
        }
    }

    /// Derives the status implied by the open work against a tool.
    ///
    /// Open issues dominate active tasks: a tool under maintenance stays
    /// under maintenance even while tasks against it remain active. With no
    /// open work the tool is available.
    #[must_use]
    pub const fn derive(has_open_issues: bool, has_active_tasks: bool) -> Self {
        if has_open_issues {
            Self::Maintenance
        } else if has_active_tasks {
            Self::InUse
        } else {
            Self::Available
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ToolStatus {
    type Error = ParseToolStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "available" => Ok(Self::Available),
            "in_use" => Ok(Self::InUse),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ParseToolStatusError(value.to_owned())),
        }
    }
}

/// Tool aggregate root.
///
/// The stored status is a projection of the open work against the tool,
/// recomputed by the persistence store after every mutation that changes
/// that work. [`Tool::apply_edit`] is the manual override path; an
/// overridden status stands until the next recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    id: ToolId,
    name: Title,
    description: Option<String>,
    status: ToolStatus,
    last_maintenance: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedToolData {
    /// Persisted tool identifier.
    pub id: ToolId,
    /// Persisted tool name.
    pub name: Title,
    /// Persisted free-form description, if any.
    pub description: Option<String>,
    /// Persisted availability status.
    pub status: ToolStatus,
    /// Persisted latest maintenance date, if any.
    pub last_maintenance: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest edit timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full replacement values for an owner's tool edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEdit {
    /// Replacement tool name.
    pub name: Title,
    /// Replacement description, if any.
    pub description: Option<String>,
    /// Replacement availability status.
    pub status: ToolStatus,
    /// Replacement latest maintenance date, if any.
    pub last_maintenance: Option<DateTime<Utc>>,
}

impl Tool {
    /// Creates a new available tool.
    #[must_use]
    pub fn new(name: Title, description: Option<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ToolId::new(),
            name,
            description,
            status: ToolStatus::Available,
            last_maintenance: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a tool from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedToolData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            last_maintenance: data.last_maintenance,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the tool identifier.
    #[must_use]
    pub const fn id(&self) -> ToolId {
        self.id
    }

    /// Returns the tool name.
    #[must_use]
    pub const fn name(&self) -> &Title {
        &self.name
    }

    /// Returns the free-form description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the availability status.
    #[must_use]
    pub const fn status(&self) -> ToolStatus {
        self.status
    }

    /// Returns the latest recorded maintenance date, if any.
    #[must_use]
    pub const fn last_maintenance(&self) -> Option<DateTime<Utc>> {
        self.last_maintenance
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces every editable field with the owner's submitted values.
    pub fn apply_edit(&mut self, edit: ToolEdit, clock: &impl Clock) {
        self.name = edit.name;
        self.description = edit.description;
        self.status = edit.status;
        self.last_maintenance = edit.last_maintenance;
        self.touch(clock);
    }

    /// Overwrites the stored status with a freshly derived value.
    ///
    /// Derivation is bookkeeping, not an edit, so `updated_at` is left
    /// alone.
    pub const fn refresh_status(&mut self, status: ToolStatus) {
        self.status = status;
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
