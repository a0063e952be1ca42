use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use polkadot_sdk::frame_support::{BoundedVec, traits::ConstU32};
use scale_info::TypeInfo;

pub use primitives::{Balance, MilestoneKind, Moment, Tier, params};

pub type AssignmentId = u64;

pub type PaymentMethod = BoundedVec<u8, ConstU32<{ params::MAX_PAYMENT_METHOD_LEN }>>;
pub type PaymentReference = BoundedVec<u8, ConstU32<{ params::MAX_PAYMENT_REFERENCE_LEN }>>;
pub type ProofPointer = BoundedVec<u8, ConstU32<{ params::MAX_PROOF_POINTER_LEN }>>;
/// Free-text justification recorded with an operator override.
pub type OverrideReason = BoundedVec<u8, ConstU32<{ params::MAX_OVERRIDE_REASON_LEN }>>;

/// Lifecycle of a single sender -> receiver help.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum HelpStatus {
  /// Linked by the matcher, nothing happened yet.
  Assigned,
  /// Receiver asked the sender to pay.
  PaymentRequested,
  /// Sender attached payment evidence.
  PaymentDone,
  /// Receiver (or the operator, or the seal) attested the payment.
  Confirmed,
  /// Receiver rejected the evidence; awaits operator review.
  Disputed,
  /// Operator upheld the dispute.
  Rejected,
  Cancelled,
}

impl HelpStatus {
  pub const fn is_terminal(self) -> bool {
    matches!(self, Self::Confirmed | Self::Rejected | Self::Cancelled)
  }

  /// Whether the record takes one of the receiver's quota slots.
  pub const fn occupies_slot(self) -> bool {
    !matches!(self, Self::Cancelled | Self::Rejected)
  }

  /// Assigned but not yet confirmed.
  pub const fn is_pending(self) -> bool {
    matches!(
      self,
      Self::Assigned | Self::PaymentRequested | Self::PaymentDone | Self::Disputed
    )
  }

  /// Participant and operator transitions. Force-confirm is checked separately.
  pub const fn can_transition_to(self, next: HelpStatus) -> bool {
    use HelpStatus::*;
    matches!(
      (self, next),
      (Assigned, PaymentRequested)
        | (Assigned, Cancelled)
        | (PaymentRequested, PaymentDone)
        | (PaymentRequested, Disputed)
        | (PaymentRequested, Cancelled)
        | (PaymentDone, Confirmed)
        | (PaymentDone, Disputed)
        | (PaymentDone, Cancelled)
        | (Disputed, Rejected)
        | (Disputed, Cancelled)
    )
  }
}

/// Who attested a confirmation.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub enum ConfirmationSource {
  Receiver,
  /// Operator force-confirm.
  Operator,
  /// Finalized while sealing the receiver's queue.
  Seal,
}

#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct PaymentEvidence {
  pub method: PaymentMethod,
  /// Normalized (trimmed, upper-cased) transaction reference.
  pub reference: PaymentReference,
  pub proof: Option<ProofPointer>,
}

/// Payment a member owes before receiving resumes.
#[derive(
  Clone, Copy, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct MilestoneDue {
  pub kind: MilestoneKind,
  pub amount: Balance,
}

#[derive(
  Clone,
  Debug,
  Default,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  PartialEq,
  TypeInfo,
  MaxEncodedLen,
)]
pub struct MemberInfo {
  pub tier: Tier,
  /// Confirmed helps received on the current tier.
  pub help_received: u32,
  /// Sum of every confirmed help amount, across tiers.
  pub total_received: Balance,
  pub is_blocked: bool,
  pub payment_blocked: bool,
  pub is_on_hold: bool,
  pub is_receiving_held: bool,
  pub help_visibility: bool,
  /// Set while receiving is paused at a milestone.
  pub milestone_due: Option<MilestoneDue>,
  pub joined_at: Moment,
}

impl MemberInfo {
  pub fn new(tier: Tier, joined_at: Moment) -> Self {
    Self {
      tier,
      help_visibility: true,
      joined_at,
      ..Default::default()
    }
  }

  pub fn quota(&self) -> u32 {
    self.tier.quota()
  }

  pub fn is_sealed(&self) -> bool {
    self.is_on_hold && self.is_receiving_held && self.help_received >= self.quota()
  }

  /// Eligible to keep collecting helps on the current tier.
  pub fn can_receive(&self) -> bool {
    !self.is_blocked
      && !self.is_receiving_held
      && !self.payment_blocked
      && self.help_received < self.quota()
  }

  /// Pause receiving when `help_received` sits on one of the tier's milestones.
  ///
  /// Only `is_receiving_held` is raised. `is_on_hold` stays reserved for the seal, so a member
  /// paused at a milestone still seals normally once its quota fills.
  pub fn reach_milestone(&mut self) -> Option<MilestoneDue> {
    let milestone = self.tier.milestone_at(self.help_received)?;
    let due = MilestoneDue {
      kind: milestone.kind,
      amount: milestone.amount,
    };
    self.milestone_due = Some(due);
    self.is_receiving_held = true;
    Some(due)
  }

  /// Clear a milestone pause. A sealed member stays sealed.
  pub fn release_milestone(&mut self) -> Option<MilestoneDue> {
    let due = self.milestone_due.take()?;
    if !self.is_sealed() {
      self.is_receiving_held = false;
    }
    Some(due)
  }

  /// Members whose pending receiver records the auditor may discard.
  pub fn is_invalid_receiver(&self) -> bool {
    self.is_blocked || self.is_receiving_held || self.payment_blocked
  }
}

#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct AssignmentRecord<AccountId> {
  pub sender: AccountId,
  pub receiver: AccountId,
  pub amount: Balance,
  pub status: HelpStatus,
  pub confirmed_by_receiver: bool,
  pub confirmation_time: Option<Moment>,
  pub confirmed_via: Option<ConfirmationSource>,
  pub payment: Option<PaymentEvidence>,
  pub is_hidden: bool,
  pub created_at: Moment,
}

impl<AccountId: PartialEq> AssignmentRecord<AccountId> {
  pub fn new(sender: AccountId, receiver: AccountId, amount: Balance, created_at: Moment) -> Self {
    Self {
      sender,
      receiver,
      amount,
      status: HelpStatus::Assigned,
      confirmed_by_receiver: false,
      confirmation_time: None,
      confirmed_via: None,
      payment: None,
      is_hidden: false,
      created_at,
    }
  }

  /// Counts toward the receiver's `help_received`.
  pub fn counts_as_received(&self) -> bool {
    !self.is_hidden && self.status == HelpStatus::Confirmed && self.confirmed_by_receiver
  }

  pub fn occupies_slot(&self) -> bool {
    !self.is_hidden && self.status.occupies_slot()
  }

  pub fn is_participant(&self, who: &AccountId) -> bool {
    &self.sender == who || &self.receiver == who
  }

  pub(crate) fn mark_confirmed(&mut self, at: Moment, via: ConfirmationSource) {
    self.status = HelpStatus::Confirmed;
    self.confirmed_by_receiver = true;
    self.confirmation_time = Some(at);
    self.confirmed_via = Some(via);
  }
}

/// Result of a seal check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SealOutcome {
  /// Fewer confirmed helps than the quota.
  Open,
  /// The queue was sealed by this call.
  Sealed,
  /// Already sealed; nothing was written.
  AlreadySealed,
  /// More confirmed helps than the quota. Needs `repair_over_quota`.
  OverQuota,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExceededReceiver<AccountId> {
  pub receiver: AccountId,
  pub assigned: u32,
  pub quota: u32,
}

/// Fire-and-forget notice handed to the notifier.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HelpNotice {
  AssignmentCreated(AssignmentId),
  PaymentRequested(AssignmentId),
  PaymentSubmitted(AssignmentId),
  PaymentConfirmed(AssignmentId),
  PaymentDisputed(AssignmentId),
  AssignmentCancelled(AssignmentId),
  AssignmentRemoved(AssignmentId),
  QueueSealed,
  MilestoneReached(MilestoneDue),
  HoldReleased,
  Promoted(Tier),
}

#[cfg(test)]
mod tests {
  use super::*;
  use HelpStatus::*;

  const ALL: [HelpStatus; 7] = [
    Assigned,
    PaymentRequested,
    PaymentDone,
    Confirmed,
    Disputed,
    Rejected,
    Cancelled,
  ];

  #[test]
  fn terminal_states_have_no_exits() {
    for from in ALL.into_iter().filter(|s| s.is_terminal()) {
      for to in ALL {
        assert!(!from.can_transition_to(to), "{from:?} -> {to:?}");
      }
    }
  }

  #[test]
  fn every_open_state_can_be_cancelled() {
    for from in ALL.into_iter().filter(|s| !s.is_terminal()) {
      assert!(from.can_transition_to(Cancelled), "{from:?}");
    }
  }

  #[test]
  fn confirmation_requires_evidence() {
    assert!(PaymentDone.can_transition_to(Confirmed));
    assert!(!Assigned.can_transition_to(Confirmed));
    assert!(!PaymentRequested.can_transition_to(Confirmed));
    assert!(!Disputed.can_transition_to(Confirmed));
  }

  #[test]
  fn pending_and_slot_sets() {
    let pending: Vec<_> = ALL.into_iter().filter(|s| s.is_pending()).collect();
    assert_eq!(pending, vec![Assigned, PaymentRequested, PaymentDone, Disputed]);
    assert!(!Cancelled.occupies_slot());
    assert!(!Rejected.occupies_slot());
    assert!(Confirmed.occupies_slot());
  }

  #[test]
  fn member_eligibility_flags() {
    let mut member = MemberInfo::new(Tier::Star, 0);
    assert!(member.can_receive());
    assert!(member.help_visibility);
    member.help_received = 3;
    assert!(!member.can_receive());
    member.help_received = 1;
    member.payment_blocked = true;
    assert!(!member.can_receive());
    assert!(member.is_invalid_receiver());
  }

  #[test]
  fn milestones_pause_and_release_receiving() {
    let mut member = MemberInfo::new(Tier::Silver, 0);
    member.help_received = 3;
    assert_eq!(member.reach_milestone(), None);
    assert!(member.can_receive());

    member.help_received = 4;
    let due = member.reach_milestone().unwrap();
    assert_eq!(due.kind, MilestoneKind::Upgrade);
    assert_eq!(due.amount, 1_800);
    assert!(!member.can_receive());
    assert!(member.is_receiving_held && !member.is_on_hold);
    assert!(!member.is_sealed());

    assert_eq!(member.release_milestone(), Some(due));
    assert!(member.can_receive());
    assert_eq!(member.release_milestone(), None);
  }

  #[test]
  fn releasing_a_sealed_member_keeps_the_seal() {
    let mut member = MemberInfo::new(Tier::Silver, 0);
    member.milestone_due = Some(MilestoneDue {
      kind: MilestoneKind::Sponsor,
      amount: 1_200,
    });
    member.help_received = 9;
    member.is_on_hold = true;
    member.is_receiving_held = true;
    assert!(member.release_milestone().is_some());
    assert!(member.is_sealed());
  }

  #[test]
  fn hidden_records_do_not_count() {
    let mut record = AssignmentRecord::new(1u64, 2u64, 300, 0);
    record.mark_confirmed(10, ConfirmationSource::Receiver);
    assert!(record.counts_as_received());
    record.is_hidden = true;
    assert!(!record.counts_as_received());
    assert!(!record.occupies_slot());
  }
}
