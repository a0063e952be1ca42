//! Leakage diagnostics.
//!
//! Explains why a receiver is not progressing. The verdict comes from an ordered decision table
//! per tier family; the first rule whose predicate holds wins. Everything here is read-only.

use crate::pallet::*;
use crate::types::*;
use alloc::vec::Vec;
use codec::{Decode, Encode};
use frame::prelude::*;
use primitives::{MilestoneKind, SEED_PAYMENT_AMOUNT};
use scale_info::TypeInfo;

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub enum Signal {
  Green,
  Yellow,
  Red,
  Blue,
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub enum Confidence {
  High,
  Medium,
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub enum RootCause {
  /// Entry member has not completed the seed help.
  SeedPaymentPending,
  /// Fewer senders assigned than the tier expects.
  AssignmentGap,
  /// Join time is in the future, elapsed time cannot be judged.
  InsufficientData,
  /// Senders are still being assigned within the SLA.
  InProgress,
  SendersNotPaid { pending: u32 },
  TierComplete,
  ReceivingHeld,
  /// Not flagged as held, yet blocked.
  SilentBlock,
  UpgradePending { amount: Balance },
  SponsorPaymentPending { amount: Balance },
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub enum Action {
  None,
  CompleteSeedPayment,
  EscalateAssignmentDelay,
  VerifyJoinTime,
  AwaitAssignments,
  AwaitSenderPayments,
  PromoteToNextTier,
  VerifyActivity,
  CheckBlockLogs,
  CompleteUpgradePayment,
  PaySponsor,
  AssignSenders,
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub enum SlotState {
  Paid,
  Assigned,
  NotAssigned,
}

#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct Verdict {
  pub signal: Signal,
  pub root_cause: RootCause,
  pub confidence: Confidence,
  pub action_required: Action,
}

#[derive(Clone, Copy, Debug, Default, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct DiagnosisStats {
  pub expected: u32,
  pub assigned_total: u32,
  pub confirmed: u32,
  pub remaining: u32,
  pub confirmed_amount: Balance,
  pub help_received: u32,
}

#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct Diagnosis {
  pub tier: Tier,
  pub verdict: Verdict,
  pub stats: DiagnosisStats,
  /// One slot per expected help, in ledger order.
  pub timeline: Vec<SlotState>,
  /// Dangling queue entries plus counter/ledger drift.
  pub integrity_warnings: u32,
}

/// Everything the decision table looks at.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Facts {
  pub tier: Tier,
  pub is_blocked: bool,
  pub is_on_hold: bool,
  pub is_receiving_held: bool,
  /// Outstanding milestone payment behind the current hold.
  pub milestone_due: Option<MilestoneDue>,
  pub seed_paid: bool,
  pub expected: u32,
  pub assigned_total: u32,
  pub confirmed: u32,
  /// Counter value, or the ledger count when the counter is still zero.
  pub received: u32,
  /// `None` when the join time lies in the future.
  pub elapsed_since_join: Option<Moment>,
  pub sla: Moment,
}

impl Facts {
  fn pending(&self) -> u32 {
    self.assigned_total.saturating_sub(self.confirmed)
  }

  fn milestone_of(&self, kind: MilestoneKind) -> Option<Balance> {
    if let Some(due) = self.milestone_due {
      return (due.kind == kind).then_some(due.amount);
    }
    self
      .tier
      .milestone_at(self.received)
      .filter(|m| m.kind == kind)
      .map(|m| m.amount)
  }
}

pub struct Rule {
  pub applies: fn(&Facts) -> bool,
  pub verdict: fn(&Facts) -> Verdict,
}

const fn verdict(
  signal: Signal,
  root_cause: RootCause,
  confidence: Confidence,
  action_required: Action,
) -> Verdict {
  Verdict {
    signal,
    root_cause,
    confidence,
    action_required,
  }
}

fn always(_: &Facts) -> bool {
  true
}

fn seed_missing(f: &Facts) -> bool {
  !f.seed_paid
}

fn under_assigned(f: &Facts) -> bool {
  f.assigned_total < f.expected
}

fn gap_past_sla(f: &Facts) -> bool {
  under_assigned(f) && f.elapsed_since_join.is_some_and(|e| e > f.sla)
}

fn gap_unknown_age(f: &Facts) -> bool {
  under_assigned(f) && f.elapsed_since_join.is_none()
}

fn unpaid(f: &Facts) -> bool {
  f.confirmed < f.expected
}

// A milestone pause is reported by the milestone rules instead.
fn held(f: &Facts) -> bool {
  (f.is_on_hold || f.is_receiving_held) && f.milestone_due.is_none()
}

fn blocked(f: &Facts) -> bool {
  f.is_blocked
}

fn upgrade_due(f: &Facts) -> bool {
  f.milestone_of(MilestoneKind::Upgrade).is_some()
}

fn sponsor_due(f: &Facts) -> bool {
  f.milestone_of(MilestoneKind::Sponsor).is_some()
}

fn seed_pending_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Yellow,
    RootCause::SeedPaymentPending,
    Confidence::High,
    Action::CompleteSeedPayment,
  )
}

fn delayed_gap_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Red,
    RootCause::AssignmentGap,
    Confidence::Medium,
    Action::EscalateAssignmentDelay,
  )
}

fn unknown_age_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Blue,
    RootCause::InsufficientData,
    Confidence::Medium,
    Action::VerifyJoinTime,
  )
}

fn in_progress_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Blue,
    RootCause::InProgress,
    Confidence::High,
    Action::AwaitAssignments,
  )
}

fn senders_not_paid_verdict(f: &Facts) -> Verdict {
  verdict(
    Signal::Yellow,
    RootCause::SendersNotPaid {
      pending: f.pending(),
    },
    Confidence::High,
    Action::AwaitSenderPayments,
  )
}

fn complete_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Green,
    RootCause::TierComplete,
    Confidence::High,
    Action::PromoteToNextTier,
  )
}

fn held_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Red,
    RootCause::ReceivingHeld,
    Confidence::High,
    Action::VerifyActivity,
  )
}

fn blocked_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Red,
    RootCause::SilentBlock,
    Confidence::High,
    Action::CheckBlockLogs,
  )
}

fn upgrade_verdict(f: &Facts) -> Verdict {
  verdict(
    Signal::Yellow,
    RootCause::UpgradePending {
      amount: f.milestone_of(MilestoneKind::Upgrade).unwrap_or_default(),
    },
    Confidence::High,
    Action::CompleteUpgradePayment,
  )
}

fn sponsor_verdict(f: &Facts) -> Verdict {
  verdict(
    Signal::Yellow,
    RootCause::SponsorPaymentPending {
      amount: f.milestone_of(MilestoneKind::Sponsor).unwrap_or_default(),
    },
    Confidence::High,
    Action::PaySponsor,
  )
}

fn assignment_gap_verdict(_: &Facts) -> Verdict {
  verdict(
    Signal::Red,
    RootCause::AssignmentGap,
    Confidence::High,
    Action::AssignSenders,
  )
}

const ENTRY_RULES: &[Rule] = &[
  Rule {
    applies: seed_missing,
    verdict: seed_pending_verdict,
  },
  Rule {
    applies: gap_past_sla,
    verdict: delayed_gap_verdict,
  },
  Rule {
    applies: gap_unknown_age,
    verdict: unknown_age_verdict,
  },
  Rule {
    applies: under_assigned,
    verdict: in_progress_verdict,
  },
  Rule {
    applies: unpaid,
    verdict: senders_not_paid_verdict,
  },
  Rule {
    applies: always,
    verdict: complete_verdict,
  },
];

const UPPER_RULES: &[Rule] = &[
  Rule {
    applies: held,
    verdict: held_verdict,
  },
  Rule {
    applies: blocked,
    verdict: blocked_verdict,
  },
  Rule {
    applies: upgrade_due,
    verdict: upgrade_verdict,
  },
  Rule {
    applies: sponsor_due,
    verdict: sponsor_verdict,
  },
  Rule {
    applies: under_assigned,
    verdict: assignment_gap_verdict,
  },
  Rule {
    applies: always,
    verdict: senders_not_paid_verdict,
  },
];

/// Decision table for a tier. Both tables end with a catch-all rule.
pub fn rules_for(tier: Tier) -> &'static [Rule] {
  if tier.is_entry() {
    ENTRY_RULES
  } else {
    UPPER_RULES
  }
}

pub fn evaluate(facts: &Facts) -> Verdict {
  rules_for(facts.tier)
    .iter()
    .find(|rule| (rule.applies)(facts))
    .map_or_else(|| senders_not_paid_verdict(facts), |rule| (rule.verdict)(facts))
}

/// Slot `i` shows the `i`-th occupying record, or `NotAssigned` past the end.
pub fn timeline<'a>(
  expected: u32,
  statuses: impl IntoIterator<Item = &'a HelpStatus>,
) -> Vec<SlotState> {
  let mut statuses = statuses.into_iter();
  (0..expected)
    .map(|_| match statuses.next() {
      Some(HelpStatus::Confirmed) => SlotState::Paid,
      Some(_) => SlotState::Assigned,
      None => SlotState::NotAssigned,
    })
    .collect()
}

impl<T: Config> Pallet<T> {
  /// Explain where `who` stands on the current tier. Read-only.
  pub fn diagnose(who: &T::AccountId) -> Result<Diagnosis, DispatchError> {
    let member = Self::member_or_err(who)?;
    let (received_records, dangling_received) = Self::receiver_records(who);
    let (sent_records, dangling_sent) = Self::sender_records(who);
    let mut integrity_warnings = dangling_received.saturating_add(dangling_sent);

    let visible: Vec<&AssignmentRecordOf<T>> = received_records
      .iter()
      .map(|(_, r)| r)
      .filter(|r| !r.is_hidden)
      .collect();
    let confirmed = visible
      .iter()
      .filter(|r| r.status == HelpStatus::Confirmed)
      .count() as u32;
    let pending = visible.iter().filter(|r| r.status.is_pending()).count() as u32;
    let confirmed_amount = visible
      .iter()
      .filter(|r| r.status == HelpStatus::Confirmed)
      .fold(0 as Balance, |acc, r| acc.saturating_add(r.amount));

    let ledger = visible.iter().filter(|r| r.counts_as_received()).count() as u32;
    if ledger != member.help_received {
      log::warn!(
        target: crate::LOG_TARGET,
        "diagnose {:?}: counter {} disagrees with ledger {}",
        who,
        member.help_received,
        ledger,
      );
      integrity_warnings = integrity_warnings.saturating_add(1);
    }

    let seed_paid = sent_records
      .iter()
      .any(|(_, r)| r.status == HelpStatus::Confirmed && r.amount == SEED_PAYMENT_AMOUNT);
    let expected = member.quota();
    let facts = Facts {
      tier: member.tier,
      is_blocked: member.is_blocked,
      is_on_hold: member.is_on_hold,
      is_receiving_held: member.is_receiving_held,
      milestone_due: member.milestone_due,
      seed_paid,
      expected,
      assigned_total: confirmed.saturating_add(pending),
      confirmed,
      received: if member.help_received == 0 {
        confirmed
      } else {
        member.help_received
      },
      elapsed_since_join: Self::now().checked_sub(member.joined_at),
      sla: T::AssignmentSla::get(),
    };

    Ok(Diagnosis {
      tier: member.tier,
      verdict: evaluate(&facts),
      stats: DiagnosisStats {
        expected,
        assigned_total: facts.assigned_total,
        confirmed,
        remaining: expected.saturating_sub(confirmed),
        confirmed_amount,
        help_received: member.help_received,
      },
      timeline: timeline(
        expected,
        visible
          .iter()
          .filter(|r| r.status.occupies_slot())
          .map(|r| &r.status),
      ),
      integrity_warnings,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const HOUR: Moment = primitives::params::HOUR_MILLIS;

  fn entry(assigned_total: u32, confirmed: u32) -> Facts {
    Facts {
      tier: Tier::Star,
      seed_paid: true,
      expected: 3,
      assigned_total,
      confirmed,
      received: confirmed,
      elapsed_since_join: Some(HOUR),
      sla: 48 * HOUR,
      ..Default::default()
    }
  }

  fn upper(tier: Tier, received: u32) -> Facts {
    Facts {
      tier,
      seed_paid: true,
      expected: tier.quota(),
      assigned_total: tier.quota(),
      confirmed: received,
      received,
      elapsed_since_join: Some(HOUR),
      sla: 48 * HOUR,
      ..Default::default()
    }
  }

  #[test]
  fn every_table_ends_with_a_catch_all() {
    for tier in primitives::TIER_ORDER {
      let rules = rules_for(tier);
      let last = rules.last().map(|r| (r.applies)(&Facts::default()));
      assert_eq!(last, Some(true), "{tier:?}");
    }
  }

  #[test]
  fn missing_seed_payment_comes_first() {
    let facts = Facts {
      seed_paid: false,
      elapsed_since_join: Some(100 * HOUR),
      ..entry(0, 0)
    };
    let v = evaluate(&facts);
    assert_eq!(v.signal, Signal::Yellow);
    assert_eq!(v.root_cause, RootCause::SeedPaymentPending);
  }

  #[test]
  fn entry_gap_past_sla_is_red_medium() {
    let facts = Facts {
      elapsed_since_join: Some(49 * HOUR),
      ..entry(1, 0)
    };
    let v = evaluate(&facts);
    assert_eq!(v.signal, Signal::Red);
    assert_eq!(v.root_cause, RootCause::AssignmentGap);
    assert_eq!(v.confidence, Confidence::Medium);
  }

  #[test]
  fn entry_gap_exactly_at_sla_is_still_in_progress() {
    let facts = Facts {
      elapsed_since_join: Some(48 * HOUR),
      ..entry(2, 0)
    };
    assert_eq!(evaluate(&facts).root_cause, RootCause::InProgress);
  }

  #[test]
  fn unknown_join_age_is_insufficient_data() {
    let facts = Facts {
      elapsed_since_join: None,
      ..entry(0, 0)
    };
    let v = evaluate(&facts);
    assert_eq!(v.signal, Signal::Blue);
    assert_eq!(v.root_cause, RootCause::InsufficientData);
    assert_eq!(v.confidence, Confidence::Medium);
  }

  #[test]
  fn entry_fully_assigned_but_unpaid() {
    let v = evaluate(&entry(3, 1));
    assert_eq!(v.signal, Signal::Yellow);
    assert_eq!(v.root_cause, RootCause::SendersNotPaid { pending: 2 });
  }

  #[test]
  fn entry_complete_is_green() {
    let v = evaluate(&entry(3, 3));
    assert_eq!(v.signal, Signal::Green);
    assert_eq!(v.root_cause, RootCause::TierComplete);
    assert_eq!(v.action_required, Action::PromoteToNextTier);
  }

  #[test]
  fn held_beats_every_other_upper_rule() {
    let facts = Facts {
      is_receiving_held: true,
      is_blocked: true,
      ..upper(Tier::Silver, 4)
    };
    assert_eq!(evaluate(&facts).root_cause, RootCause::ReceivingHeld);
    let facts = Facts {
      is_on_hold: true,
      ..upper(Tier::Gold, 0)
    };
    assert_eq!(evaluate(&facts).signal, Signal::Red);
  }

  #[test]
  fn blocked_without_hold_is_silent_block() {
    let facts = Facts {
      is_blocked: true,
      ..upper(Tier::Platinum, 3)
    };
    assert_eq!(evaluate(&facts).root_cause, RootCause::SilentBlock);
  }

  #[test]
  fn milestones_pause_upper_tiers() {
    assert_eq!(
      evaluate(&upper(Tier::Silver, 4)).root_cause,
      RootCause::UpgradePending { amount: 1_800 }
    );
    assert_eq!(
      evaluate(&upper(Tier::Silver, 7)).root_cause,
      RootCause::SponsorPaymentPending { amount: 1_200 }
    );
    assert_eq!(
      evaluate(&upper(Tier::Platinum, 11)).root_cause,
      RootCause::UpgradePending { amount: 200_000 }
    );
    assert_eq!(
      evaluate(&upper(Tier::Diamond, 242)).root_cause,
      RootCause::SponsorPaymentPending { amount: 600_000 }
    );
  }

  #[test]
  fn milestone_hold_reports_the_payment_due() {
    let facts = Facts {
      is_receiving_held: true,
      milestone_due: Some(MilestoneDue {
        kind: MilestoneKind::Upgrade,
        amount: 20_000,
      }),
      ..upper(Tier::Gold, 11)
    };
    let v = evaluate(&facts);
    assert_eq!(v.root_cause, RootCause::UpgradePending { amount: 20_000 });

    let released = Facts {
      milestone_due: None,
      ..facts
    };
    assert_eq!(evaluate(&released).root_cause, RootCause::ReceivingHeld);
  }

  #[test]
  fn upper_gap_is_red_high() {
    let facts = Facts {
      assigned_total: 5,
      ..upper(Tier::Silver, 2)
    };
    let v = evaluate(&facts);
    assert_eq!(v.root_cause, RootCause::AssignmentGap);
    assert_eq!(v.confidence, Confidence::High);
  }

  #[test]
  fn upper_fully_assigned_waits_for_senders() {
    assert_eq!(
      evaluate(&upper(Tier::Gold, 20)).root_cause,
      RootCause::SendersNotPaid { pending: 7 }
    );
  }

  #[test]
  fn evaluation_is_deterministic() {
    let facts = upper(Tier::Gold, 11);
    assert_eq!(evaluate(&facts), evaluate(&facts));
  }

  #[test]
  fn timeline_has_exactly_expected_slots() {
    let statuses = [HelpStatus::Confirmed, HelpStatus::PaymentDone];
    assert_eq!(
      timeline(3, &statuses),
      vec![SlotState::Paid, SlotState::Assigned, SlotState::NotAssigned]
    );
    let many = [HelpStatus::Assigned; 5];
    assert_eq!(timeline(3, &many).len(), 3);
  }
}
