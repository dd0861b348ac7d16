//! Tool issue aggregate root and issue lifecycle status.

use super::{DomainError, IssueId, ParseIssueStatusError, Title, ToolId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a reported tool issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// The issue has been reported and awaits triage.
    Reported,
    /// An owner is looking into the issue.
    UnderReview,
    /// The issue has been dealt with.
    Resolved,
}

impl IssueStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::UnderReview => "under_review",
            Self::Resolved => "resolved",
        }
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// Triage moves strictly forward. Resolving straight from reported is
    /// allowed; reopening is not.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Reported, Self::UnderReview | Self::Resolved)
                | (Self::UnderReview, Self::Resolved)
        )
    }

    /// Returns whether an issue in this status still holds its tool in
    /// maintenance.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Resolved)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IssueStatus {
    type Error = ParseIssueStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "reported" => Ok(Self::Reported),
            "under_review" => Ok(Self::UnderReview),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseIssueStatusError(value.to_owned())),
        }
    }
}

/// Tool issue aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolIssue {
    id: IssueId,
    title: Title,
    description: String,
    reported_date: DateTime<Utc>,
    status: IssueStatus,
    reporter_id: UserId,
    tool_id: ToolId,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedIssueData {
    /// Persisted issue identifier.
    pub id: IssueId,
    /// Persisted title.
    pub title: Title,
    /// Persisted problem description.
    pub description: String,
    /// Persisted report timestamp.
    pub reported_date: DateTime<Utc>,
    /// Persisted lifecycle status.
    pub status: IssueStatus,
    /// Persisted reporting worker.
    pub reporter_id: UserId,
    /// Persisted tool reference.
    pub tool_id: ToolId,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ToolIssue {
    /// Creates a newly reported issue against a tool.
    ///
    /// Issues require a problem description; tasks and tools do not.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyDescription`] when the description is
    /// empty after trimming.
    pub fn new(
        title: Title,
        description: impl Into<String>,
        reporter_id: UserId,
        tool_id: ToolId,
        clock: &impl Clock,
    ) -> Result<Self, DomainError> {
        let raw = description.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(DomainError::EmptyDescription);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: IssueId::new(),
            title,
            description: normalized.to_owned(),
            reported_date: timestamp,
            status: IssueStatus::Reported,
            reporter_id,
            tool_id,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an issue from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedIssueData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            reported_date: data.reported_date,
            status: data.status,
            reporter_id: data.reporter_id,
            tool_id: data.tool_id,
            updated_at: data.updated_at,
        }
    }

    /// Returns the issue identifier.
    #[must_use]
    pub const fn id(&self) -> IssueId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the problem description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the report timestamp.
    #[must_use]
    pub const fn reported_date(&self) -> DateTime<Utc> {
        self.reported_date
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the reporting worker's identifier.
    #[must_use]
    pub const fn reporter_id(&self) -> UserId {
        self.reporter_id
    }

    /// Returns the affected tool's identifier.
    #[must_use]
    pub const fn tool_id(&self) -> ToolId {
        self.tool_id
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the issue still holds its tool in maintenance.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Moves the issue to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIssueTransition`] when the move is not
    /// a permitted forward transition.
    pub fn transition_to(
        &mut self,
        target: IssueStatus,
        clock: &impl Clock,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::InvalidIssueTransition {
                issue_id: self.id,
                from: self.status.as_str().to_owned(),
                to: target.as_str().to_owned(),
            });
        }

        self.status = target;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
