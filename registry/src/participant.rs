//! Participant (voter/user) registry.

use crate::index::ReviewIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tally_types::{ApprovalStatus, ContentRef, ElectionError, Identity, Notification};

/// A registered participant. Presence in the registry means `registered`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub document: ContentRef,
    pub profile: ContentRef,
    pub approval: ApprovalStatus,
}

/// Participants keyed by identity.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ParticipantRegistry {
    participants: HashMap<Identity, Participant>,
    review: ReviewIndex<Identity>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `identity` with status Pending.
    pub fn register(
        &mut self,
        identity: Identity,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        if self.participants.contains_key(&identity) {
            return Err(ElectionError::AlreadyRegistered(identity.to_string()));
        }
        self.participants.insert(
            identity,
            Participant {
                document,
                profile,
                approval: ApprovalStatus::Pending,
            },
        );
        self.review.track(&identity, None, ApprovalStatus::Pending);
        tracing::debug!(participant = %identity, "participant registered");
        Ok(Notification::ParticipantRegistered { identity })
    }

    /// Overwrite the profile and send the participant back to review.
    pub fn update(
        &mut self,
        identity: &Identity,
        document: ContentRef,
        profile: ContentRef,
    ) -> Result<Notification, ElectionError> {
        let participant = self
            .participants
            .get_mut(identity)
            .ok_or_else(|| ElectionError::NotRegistered(identity.to_string()))?;
        let old = participant.approval;
        participant.document = document;
        participant.profile = profile;
        participant.approval = ApprovalStatus::Pending;
        self.review.track(identity, Some(old), ApprovalStatus::Pending);
        tracing::debug!(participant = %identity, "participant updated, back to review");
        Ok(Notification::ParticipantUpdated {
            identity: *identity,
        })
    }

    /// Set the approval status. Any status may follow any other.
    pub fn set_status(
        &mut self,
        identity: &Identity,
        status: ApprovalStatus,
    ) -> Result<Notification, ElectionError> {
        let participant = self
            .participants
            .get_mut(identity)
            .ok_or_else(|| ElectionError::NotRegistered(identity.to_string()))?;
        let old = std::mem::replace(&mut participant.approval, status);
        self.review.track(identity, Some(old), status);
        tracing::debug!(participant = %identity, ?status, "participant status set");
        Ok(Notification::ParticipantStatusChanged {
            identity: *identity,
            status,
        })
    }

    pub fn get(&self, identity: &Identity) -> Option<&Participant> {
        self.participants.get(identity)
    }

    pub fn is_registered(&self, identity: &Identity) -> bool {
        self.participants.contains_key(identity)
    }

    pub fn is_approved(&self, identity: &Identity) -> bool {
        self.review.is_approved(identity)
    }

    /// Approved participants in identity order.
    pub fn approved(&self) -> impl Iterator<Item = &Identity> {
        self.review.approved()
    }

    /// Participants awaiting review, in identity order.
    pub fn pending(&self) -> impl Iterator<Item = &Identity> {
        self.review.pending()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}
