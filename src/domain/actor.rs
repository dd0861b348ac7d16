//! Acting-user identity threaded through service operations.

use super::{Role, TaskId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity and role of the user invoking an operation.
///
/// Every service operation receives the actor explicitly; there is no
/// ambient current-user state. The embedding application resolves its
/// session into an `Actor` before calling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    user_id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from a resolved account identity.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }

    /// Returns the acting user's role.
    #[must_use]
    pub const fn role(self) -> Role {
        self.role
    }

    /// Validates that the actor holds the owner role.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::RoleRequired`] when the actor is not an owner.
    pub fn ensure_owner(self, operation: &'static str) -> Result<(), AccessDenied> {
        self.ensure_role(Role::Owner, operation)
    }

    /// Validates that the actor holds the worker role.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied::RoleRequired`] when the actor is not a worker.
    pub fn ensure_worker(self, operation: &'static str) -> Result<(), AccessDenied> {
        self.ensure_role(Role::Worker, operation)
    }

    fn ensure_role(self, required: Role, operation: &'static str) -> Result<(), AccessDenied> {
        if self.role == required {
            return Ok(());
        }

        Err(AccessDenied::RoleRequired {
            actor: self.user_id,
            operation,
            required,
        })
    }
}

/// Access-control rejection raised before an operation touches any state.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AccessDenied {
    /// The operation requires a role the actor does not hold.
    #[error("user {actor} lacks the {required} role required by {operation}")]
    RoleRequired {
        /// Identifier of the rejected actor.
        actor: UserId,
        /// Name of the attempted operation.
        operation: &'static str,
        /// Role the operation requires.
        required: Role,
    },

    /// The operation is reserved for the task's assigned worker.
    #[error("user {actor} is not assigned to task {task_id}")]
    NotTaskAssignee {
        /// Identifier of the rejected actor.
        actor: UserId,
        /// Identifier of the protected task.
        task_id: TaskId,
    },

    /// The operation is reserved for the record's owning worker.
    #[error("user {actor} may not read records belonging to user {subject}")]
    NotRecordOwner {
        /// Identifier of the rejected actor.
        actor: UserId,
        /// Identifier of the records' owner.
        subject: UserId,
    },
}
