//! Job request aggregate root and decision status.

use super::{DomainError, ParseRequestStatusError, RequestId, Title, ToolId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision status of a job request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// The request awaits an owner's decision.
    Pending,
    /// An owner approved the request and a task was created from it.
    Approved,
    /// An owner declined the request.
    Declined,
}

impl RequestStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
        }
    }

    /// Returns whether the request still awaits a decision.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RequestStatus {
    type Error = ParseRequestStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "declined" => Ok(Self::Declined),
            _ => Err(ParseRequestStatusError(value.to_owned())),
        }
    }
}

/// Job request aggregate root.
///
/// A request is decided at most once: both [`JobRequest::approve`] and
/// [`JobRequest::decline`] refuse anything that is no longer pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    id: RequestId,
    title: Title,
    description: String,
    requested_date: DateTime<Utc>,
    status: RequestStatus,
    requester_id: UserId,
    tool_id: Option<ToolId>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted job request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRequestData {
    /// Persisted request identifier.
    pub id: RequestId,
    /// Persisted title.
    pub title: Title,
    /// Persisted work description.
    pub description: String,
    /// Persisted submission timestamp.
    pub requested_date: DateTime<Utc>,
    /// Persisted decision status.
    pub status: RequestStatus,
    /// Persisted requesting worker.
    pub requester_id: UserId,
    /// Persisted tool reference, if any.
    pub tool_id: Option<ToolId>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl JobRequest {
    /// Creates a new pending job request.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyDescription`] when the description is
    /// empty after trimming.
    pub fn new(
        title: Title,
        description: impl Into<String>,
        requester_id: UserId,
        tool_id: Option<ToolId>,
        clock: &impl Clock,
    ) -> Result<Self, DomainError> {
        let raw = description.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(DomainError::EmptyDescription);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: RequestId::new(),
            title,
            description: normalized.to_owned(),
            requested_date: timestamp,
            status: RequestStatus::Pending,
            requester_id,
            tool_id,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a job request from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRequestData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            requested_date: data.requested_date,
            status: data.status,
            requester_id: data.requester_id,
            tool_id: data.tool_id,
            updated_at: data.updated_at,
        }
    }

    /// Returns the request identifier.
    #[must_use]
    pub const fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the work description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn requested_date(&self) -> DateTime<Utc> {
        self.requested_date
    }

    /// Returns the decision status.
    #[must_use]
    pub const fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns the requesting worker's identifier.
    #[must_use]
    pub const fn requester_id(&self) -> UserId {
        self.requester_id
    }

    /// Returns the requested tool's identifier, if any.
    #[must_use]
    pub const fn tool_id(&self) -> Option<ToolId> {
        self.tool_id
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the request still awaits a decision.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// Records an approval decision.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RequestAlreadyDecided`] when the request is
    /// no longer pending.
    pub fn approve(&mut self, clock: &impl Clock) -> Result<(), DomainError> {
        self.decide(RequestStatus::Approved, clock)
    }

    /// Records a decline decision.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RequestAlreadyDecided`] when the request is
    /// no longer pending.
    pub fn decline(&mut self, clock: &impl Clock) -> Result<(), DomainError> {
        self.decide(RequestStatus::Declined, clock)
    }

    fn decide(&mut self, decision: RequestStatus, clock: &impl Clock) -> Result<(), DomainError> {
        if !self.status.is_pending() {
            return Err(DomainError::RequestAlreadyDecided {
                request_id: self.id,
                status: self.status.as_str().to_owned(),
            });
        }

        self.status = decision;
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
