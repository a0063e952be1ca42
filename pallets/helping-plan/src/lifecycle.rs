//! Payment confirmation state machine.
//!
//! Every transition re-reads the record and the receiver inside the dispatch that writes, so a
//! stale caller view can never confirm past the quota.

use crate::pallet::*;
use crate::types::*;
use frame::prelude::*;

impl<T: Config> Pallet<T> {
  /// Move `record` to `to` and persist it.
  fn transition(
    id: AssignmentId,
    mut record: AssignmentRecordOf<T>,
    to: HelpStatus,
  ) -> Result<AssignmentRecordOf<T>, DispatchError> {
    let from = record.status;
    ensure!(from.can_transition_to(to), Error::<T>::InvalidTransition);
    record.status = to;
    Assignments::<T>::insert(id, &record);
    log::debug!(target: crate::LOG_TARGET, "assignment {}: {:?} -> {:?}", id, from, to);
    Self::deposit_event(Event::StatusChanged { id, from, to });
    Ok(record)
  }

  /// A record the participants may still act on. Hidden records are archived and frozen.
  fn live_record_or_err(id: AssignmentId) -> Result<AssignmentRecordOf<T>, DispatchError> {
    let record = Self::record_or_err(id)?;
    ensure!(!record.is_hidden, Error::<T>::AssignmentHidden);
    Ok(record)
  }

  pub(crate) fn do_request_payment(who: &T::AccountId, id: AssignmentId) -> DispatchResult {
    let record = Self::live_record_or_err(id)?;
    ensure!(&record.receiver == who, Error::<T>::NotReceiver);
    ensure!(
      record.status.can_transition_to(HelpStatus::PaymentRequested),
      Error::<T>::InvalidTransition
    );
    let member = Self::member_or_err(who)?;
    ensure!(member.can_receive(), Error::<T>::ReceiverNotEligible);
    let record = Self::transition(id, record, HelpStatus::PaymentRequested)?;
    Self::notify(&record.sender, HelpNotice::PaymentRequested(id));
    Ok(())
  }

  pub(crate) fn do_submit_payment(
    who: &T::AccountId,
    id: AssignmentId,
    method: PaymentMethod,
    reference: PaymentReference,
    proof: Option<ProofPointer>,
  ) -> DispatchResult {
    let mut record = Self::live_record_or_err(id)?;
    ensure!(&record.sender == who, Error::<T>::NotSender);
    ensure!(
      record.status.can_transition_to(HelpStatus::PaymentDone),
      Error::<T>::InvalidTransition
    );
    let reference = normalize_reference(reference);
    ensure!(
      reference.len() as u32 >= T::MinPaymentReferenceLen::get(),
      Error::<T>::PaymentReferenceTooShort
    );
    ensure!(
      !PaymentReferences::<T>::contains_key(&reference),
      Error::<T>::PaymentReferenceAlreadyUsed
    );
    PaymentReferences::<T>::insert(&reference, id);
    record.payment = Some(PaymentEvidence {
      method,
      reference: reference.clone(),
      proof,
    });
    let record = Self::transition(id, record, HelpStatus::PaymentDone)?;
    Self::deposit_event(Event::PaymentSubmitted { id, reference });
    Self::notify(&record.receiver, HelpNotice::PaymentSubmitted(id));
    Ok(())
  }

  pub(crate) fn do_confirm_payment(who: &T::AccountId, id: AssignmentId) -> DispatchResult {
    let record = Self::live_record_or_err(id)?;
    ensure!(&record.receiver == who, Error::<T>::NotReceiver);
    ensure!(!record.confirmed_by_receiver, Error::<T>::AlreadyConfirmed);
    ensure!(
      record.status.can_transition_to(HelpStatus::Confirmed),
      Error::<T>::InvalidTransition
    );
    Self::confirm(id, record, ConfirmationSource::Receiver)
  }

  pub(crate) fn do_dispute_payment(who: &T::AccountId, id: AssignmentId) -> DispatchResult {
    let record = Self::live_record_or_err(id)?;
    ensure!(&record.receiver == who, Error::<T>::NotReceiver);
    let record = Self::transition(id, record, HelpStatus::Disputed)?;
    Self::notify(&record.sender, HelpNotice::PaymentDisputed(id));
    Ok(())
  }

  pub(crate) fn do_cancel_assignment(who: &T::AccountId, id: AssignmentId) -> DispatchResult {
    let record = Self::live_record_or_err(id)?;
    ensure!(record.is_participant(who), Error::<T>::NotParticipant);
    let record = Self::transition(id, record, HelpStatus::Cancelled)?;
    let other = if &record.sender == who {
      &record.receiver
    } else {
      &record.sender
    };
    Self::notify(other, HelpNotice::AssignmentCancelled(id));
    Ok(())
  }

  pub(crate) fn do_reject_dispute(id: AssignmentId) -> DispatchResult {
    let record = Self::record_or_err(id)?;
    let record = Self::transition(id, record, HelpStatus::Rejected)?;
    Self::notify(&record.sender, HelpNotice::PaymentDisputed(id));
    Ok(())
  }

  pub(crate) fn do_force_confirm(
    id: AssignmentId,
    receiver: &T::AccountId,
    reason: OverrideReason,
  ) -> DispatchResult {
    let record = Self::live_record_or_err(id)?;
    ensure!(&record.receiver == receiver, Error::<T>::ReceiverMismatch);
    ensure!(
      !matches!(record.status, HelpStatus::Rejected | HelpStatus::Cancelled),
      Error::<T>::InvalidTransition
    );
    ensure!(!record.confirmed_by_receiver, Error::<T>::AlreadyConfirmed);
    Self::confirm(id, record, ConfirmationSource::Operator)?;
    log::info!(
      target: crate::LOG_TARGET,
      "operator force-confirmed assignment {} for {:?}",
      id,
      receiver,
    );
    Self::deposit_event(Event::ForceConfirmed {
      id,
      receiver: receiver.clone(),
      reason,
    });
    Ok(())
  }

  /// Confirm, bump the receiver's counter and run the seal check.
  ///
  /// The counter is re-read here so the quota bound holds against whatever was written before
  /// this call.
  fn confirm(
    id: AssignmentId,
    mut record: AssignmentRecordOf<T>,
    via: ConfirmationSource,
  ) -> DispatchResult {
    let mut member = Self::member_or_err(&record.receiver)?;
    ensure!(
      member.help_received < member.quota(),
      Error::<T>::QuotaAlreadyMet
    );
    let from = record.status;
    record.mark_confirmed(Self::now(), via);
    member.help_received = member.help_received.saturating_add(1);
    member.total_received = member.total_received.saturating_add(record.amount);
    let milestone = member.reach_milestone();
    Assignments::<T>::insert(id, &record);
    Members::<T>::insert(&record.receiver, &member);

    log::debug!(
      target: crate::LOG_TARGET,
      "assignment {} confirmed via {:?}, receiver at {}/{}",
      id,
      via,
      member.help_received,
      member.quota(),
    );
    Self::deposit_event(Event::StatusChanged {
      id,
      from,
      to: HelpStatus::Confirmed,
    });
    Self::deposit_event(Event::PaymentConfirmed {
      id,
      receiver: record.receiver.clone(),
      via,
      help_received: member.help_received,
    });
    Self::notify(&record.sender, HelpNotice::PaymentConfirmed(id));
    if let Some(due) = milestone {
      log::info!(
        target: crate::LOG_TARGET,
        "{:?} paused at {} received, owes {:?} of {}",
        record.receiver,
        member.help_received,
        due.kind,
        due.amount,
      );
      Self::deposit_event(Event::MilestoneReached {
        who: record.receiver.clone(),
        kind: due.kind,
        amount: due.amount,
      });
      Self::notify(&record.receiver, HelpNotice::MilestoneReached(due));
    }
    Self::do_check_and_seal(&record.receiver)?;
    Ok(())
  }
}

/// Trim surrounding whitespace and upper-case a payment reference.
pub fn normalize_reference(reference: PaymentReference) -> PaymentReference {
  let raw = reference.into_inner();
  let start = raw
    .iter()
    .position(|b| !b.is_ascii_whitespace())
    .unwrap_or(raw.len());
  let end = raw
    .iter()
    .rposition(|b| !b.is_ascii_whitespace())
    .map_or(start, |i| i + 1);
  let normalized: alloc::vec::Vec<u8> = raw[start..end]
    .iter()
    .map(u8::to_ascii_uppercase)
    .collect();
  // Never longer than the input, so the bound still holds.
  PaymentReference::truncate_from(normalized)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn reference(raw: &[u8]) -> PaymentReference {
    PaymentReference::truncate_from(raw.to_vec())
  }

  #[test]
  fn references_are_trimmed_and_upper_cased() {
    assert_eq!(
      normalize_reference(reference(b"  utr123abc \n")).into_inner(),
      b"UTR123ABC".to_vec()
    );
  }

  #[test]
  fn blank_reference_normalizes_to_empty() {
    assert!(normalize_reference(reference(b"   ")).is_empty());
    assert!(normalize_reference(reference(b"")).is_empty());
  }

  #[test]
  fn inner_whitespace_is_kept() {
    assert_eq!(
      normalize_reference(reference(b"ab cd")).into_inner(),
      b"AB CD".to_vec()
    );
  }
}
