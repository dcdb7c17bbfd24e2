//! Event membership: who is allowed to play.
//!
//! The engine does not own membership state; it only asks the
//! [`MembershipGate`] question. The full lifecycle record and an in-memory
//! roster are provided for callers (and tests) that have nowhere else to keep
//! it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CompetitorId, EventId};

/// Membership lifecycle states. Only ATIVO members may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    /// Invited, not yet accepted.
    Convidado,
    /// Active member, eligible to play.
    Ativo,
    /// Left the event voluntarily.
    Inativo,
    /// Temporarily suspended.
    Suspenso,
    /// Soft-deleted; history preserved.
    Deletado,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Convidado => "convidado",
            MembershipStatus::Ativo => "ativo",
            MembershipStatus::Inativo => "inativo",
            MembershipStatus::Suspenso => "suspenso",
            MembershipStatus::Deletado => "deletado",
        }
    }
}

/// One competitor's standing within one event, with its timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub event_id: EventId,
    pub competitor_id: CompetitorId,
    pub status: MembershipStatus,
    pub joined_at: Option<DateTime<Utc>>,
    pub left_at: Option<DateTime<Utc>>,
    pub suspended_at: Option<DateTime<Utc>>,
    pub suspension_reason: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Membership {
    pub fn invited(event_id: EventId, competitor_id: CompetitorId) -> Self {
        Self {
            event_id,
            competitor_id,
            status: MembershipStatus::Convidado,
            joined_at: None,
            left_at: None,
            suspended_at: None,
            suspension_reason: None,
            updated_at: Utc::now(),
        }
    }

    /// An already-active membership, joined now.
    pub fn active(event_id: EventId, competitor_id: CompetitorId) -> Self {
        let mut membership = Self::invited(event_id, competitor_id);
        membership.status = MembershipStatus::Ativo;
        membership.joined_at = Some(Utc::now());
        membership
    }

    /// CONVIDADO -> ATIVO. Returns false if the invite is not pending.
    pub fn accept_invite(&mut self) -> bool {
        if self.status != MembershipStatus::Convidado {
            return false;
        }
        self.status = MembershipStatus::Ativo;
        self.joined_at = Some(Utc::now());
        self.updated_at = Utc::now();
        true
    }

    /// ATIVO -> INATIVO (voluntary exit).
    pub fn leave(&mut self) -> bool {
        if self.status != MembershipStatus::Ativo {
            return false;
        }
        self.status = MembershipStatus::Inativo;
        self.left_at = Some(Utc::now());
        self.updated_at = Utc::now();
        true
    }

    /// Any non-deleted state -> SUSPENSO.
    pub fn suspend(&mut self, reason: impl Into<String>) -> bool {
        if self.status == MembershipStatus::Deletado {
            return false;
        }
        self.status = MembershipStatus::Suspenso;
        self.suspended_at = Some(Utc::now());
        self.suspension_reason = Some(reason.into());
        self.updated_at = Utc::now();
        true
    }

    /// SUSPENSO -> ATIVO, clearing the suspension record.
    pub fn reactivate(&mut self) -> bool {
        if self.status != MembershipStatus::Suspenso {
            return false;
        }
        self.status = MembershipStatus::Ativo;
        self.suspended_at = None;
        self.suspension_reason = None;
        self.updated_at = Utc::now();
        true
    }

    /// Any state -> DELETADO (soft delete).
    pub fn soft_delete(&mut self) {
        self.status = MembershipStatus::Deletado;
        self.updated_at = Utc::now();
    }

    pub fn is_active(&self) -> bool {
        self.status == MembershipStatus::Ativo
    }

    pub fn can_play(&self) -> bool {
        self.is_active()
    }
}

/// Answers "may competitor X play in event Y right now".
pub trait MembershipGate {
    fn can_play(&self, event_id: EventId, competitor_id: CompetitorId) -> bool;
}

/// In-memory roster keyed by (event, competitor).
#[derive(Debug, Default)]
pub struct MembershipRoster {
    memberships: HashMap<(EventId, CompetitorId), Membership>,
}

impl MembershipRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&mut self, membership: Membership) {
        self.memberships
            .insert((membership.event_id, membership.competitor_id), membership);
    }

    pub fn get(&self, event_id: EventId, competitor_id: CompetitorId) -> Option<&Membership> {
        self.memberships.get(&(event_id, competitor_id))
    }

    pub fn get_mut(
        &mut self,
        event_id: EventId,
        competitor_id: CompetitorId,
    ) -> Option<&mut Membership> {
        self.memberships.get_mut(&(event_id, competitor_id))
    }
}

impl MembershipGate for MembershipRoster {
    fn can_play(&self, event_id: EventId, competitor_id: CompetitorId) -> bool {
        self.get(event_id, competitor_id)
            .is_some_and(Membership::can_play)
    }
}
