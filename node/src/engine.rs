//! The seam between the authority loop and the election engines.

use std::fmt::Debug;

use tally_elections::{ElectionCommand, ElectionsEngine};
use tally_types::{ElectionError, Identity, Notification, Timestamp};
use tally_workflow::{WorkflowCommand, WorkflowEngine};

/// An engine the [`Authority`](crate::Authority) can own and drive.
pub trait Ledger: Send + Sync + 'static {
    type Command: Debug + Send + 'static;

    /// A fresh engine owned by `owner`.
    fn create(owner: Identity) -> Result<Self, ElectionError>
    where
        Self: Sized;

    /// Apply one command on behalf of `caller` at `now`.
    fn apply(
        &mut self,
        caller: &Identity,
        command: Self::Command,
        now: Timestamp,
    ) -> Result<Notification, ElectionError>;

    /// The command that grants `identity` the admin role.
    fn grant_admin(identity: Identity) -> Self::Command;
}

impl Ledger for WorkflowEngine {
    type Command = WorkflowCommand;

    fn create(owner: Identity) -> Result<Self, ElectionError> {
        WorkflowEngine::new(owner)
    }

    // The fixed workflow has no time-dependent rules.
    fn apply(
        &mut self,
        caller: &Identity,
        command: WorkflowCommand,
        _now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        WorkflowEngine::apply(self, caller, command)
    }

    fn grant_admin(identity: Identity) -> WorkflowCommand {
        WorkflowCommand::SetAdmin {
            identity,
            is_admin: true,
        }
    }
}

impl Ledger for ElectionsEngine {
    type Command = ElectionCommand;

    fn create(owner: Identity) -> Result<Self, ElectionError> {
        ElectionsEngine::new(owner)
    }

    fn apply(
        &mut self,
        caller: &Identity,
        command: ElectionCommand,
        now: Timestamp,
    ) -> Result<Notification, ElectionError> {
        ElectionsEngine::apply(self, caller, command, now)
    }

    fn grant_admin(identity: Identity) -> ElectionCommand {
        ElectionCommand::SetAdmin {
            identity,
            is_admin: true,
        }
    }
}
