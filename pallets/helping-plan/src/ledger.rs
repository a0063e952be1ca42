//! Assignment ledger.
//!
//! Each link is stored once in `Assignments` and indexed by two ordered projections,
//! `ReceiverQueue` and `SenderQueue`. Only the functions here write the projections, and they
//! always write the record and both queues together, so the receiver and sender views can never
//! disagree on status or confirmation.

use crate::pallet::*;
use crate::types::*;
use alloc::vec::Vec;
use frame::prelude::*;

impl<T: Config> Pallet<T> {
  pub(crate) fn do_create_assignment(
    sender: T::AccountId,
    receiver: T::AccountId,
    amount: Balance,
  ) -> Result<AssignmentId, DispatchError> {
    ensure!(sender != receiver, Error::<T>::SelfAssignment);
    ensure!(amount > 0, Error::<T>::ZeroAmount);
    Self::member_or_err(&sender)?;
    let member = Self::member_or_err(&receiver)?;
    // The matcher owns placement policy; over-assignment is the auditor's job to fix.
    if !member.can_receive() {
      log::warn!(
        target: crate::LOG_TARGET,
        "assigning to ineligible receiver {:?} ({}/{} received, held: {})",
        receiver,
        member.help_received,
        member.quota(),
        member.is_receiving_held,
      );
    }
    let id = Self::insert_assignment(sender.clone(), receiver.clone(), amount)?;
    Self::deposit_event(Event::AssignmentCreated {
      id,
      sender: sender.clone(),
      receiver: receiver.clone(),
      amount,
    });
    Self::notify(&receiver, HelpNotice::AssignmentCreated(id));
    Self::notify(&sender, HelpNotice::AssignmentCreated(id));
    Ok(id)
  }

  /// Append a new record and its two projection entries.
  pub(crate) fn insert_assignment(
    sender: T::AccountId,
    receiver: T::AccountId,
    amount: Balance,
  ) -> Result<AssignmentId, DispatchError> {
    let id = NextAssignmentId::<T>::get();
    let next = id.checked_add(1).ok_or(Error::<T>::AssignmentIdOverflow)?;
    let mut receiver_queue = ReceiverQueue::<T>::get(&receiver);
    receiver_queue
      .try_push(id)
      .map_err(|_| Error::<T>::ReceiverQueueFull)?;
    let mut sender_queue = SenderQueue::<T>::get(&sender);
    sender_queue
      .try_push(id)
      .map_err(|_| Error::<T>::SenderQueueFull)?;

    ReceiverQueue::<T>::insert(&receiver, receiver_queue);
    SenderQueue::<T>::insert(&sender, sender_queue);
    Assignments::<T>::insert(
      id,
      AssignmentRecord::new(sender, receiver, amount, Self::now()),
    );
    NextAssignmentId::<T>::put(next);
    log::debug!(target: crate::LOG_TARGET, "assignment {} created", id);
    Ok(id)
  }

  /// Delete a record and both of its projection entries.
  pub(crate) fn delete_assignment(id: AssignmentId) -> Result<AssignmentRecordOf<T>, DispatchError> {
    let record = Assignments::<T>::take(id).ok_or(Error::<T>::AssignmentNotFound)?;
    ReceiverQueue::<T>::mutate_exists(&record.receiver, |maybe| {
      if let Some(queue) = maybe {
        queue.retain(|x| *x != id);
        if queue.is_empty() {
          *maybe = None;
        }
      }
    });
    SenderQueue::<T>::mutate_exists(&record.sender, |maybe| {
      if let Some(queue) = maybe {
        queue.retain(|x| *x != id);
        if queue.is_empty() {
          *maybe = None;
        }
      }
    });
    Self::deposit_event(Event::AssignmentRemoved {
      id,
      sender: record.sender.clone(),
      receiver: record.receiver.clone(),
    });
    Self::notify(&record.sender, HelpNotice::AssignmentRemoved(id));
    log::info!(target: crate::LOG_TARGET, "assignment {} removed", id);
    Ok(record)
  }

  pub(crate) fn record_or_err(id: AssignmentId) -> Result<AssignmentRecordOf<T>, DispatchError> {
    Assignments::<T>::get(id).ok_or_else(|| Error::<T>::AssignmentNotFound.into())
  }

  /// Resolve queue ids to records. Ids without a record are logged and counted.
  fn load(ids: &[AssignmentId]) -> (Vec<(AssignmentId, AssignmentRecordOf<T>)>, u32) {
    let mut dangling = 0u32;
    let records = ids
      .iter()
      .filter_map(|id| match Assignments::<T>::get(id) {
        Some(record) => Some((*id, record)),
        None => {
          dangling = dangling.saturating_add(1);
          log::warn!(target: crate::LOG_TARGET, "queue entry {} has no record", id);
          None
        }
      })
      .collect();
    (records, dangling)
  }

  /// Receiver-side records in ledger order, plus the number of dangling queue entries.
  pub fn receiver_records(
    who: &T::AccountId,
  ) -> (Vec<(AssignmentId, AssignmentRecordOf<T>)>, u32) {
    Self::load(&ReceiverQueue::<T>::get(who))
  }

  /// Sender-side records in ledger order, plus the number of dangling queue entries.
  pub fn sender_records(who: &T::AccountId) -> (Vec<(AssignmentId, AssignmentRecordOf<T>)>, u32) {
    Self::load(&SenderQueue::<T>::get(who))
  }

  /// Confirmed, non-hidden receiver-side records. This is what `help_received` must equal.
  pub fn ledger_received(who: &T::AccountId) -> u32 {
    let (records, _) = Self::receiver_records(who);
    records
      .iter()
      .filter(|(_, r)| r.counts_as_received())
      .count() as u32
  }

  /// Reset `help_received` to the ledger count. Returns the reconciled value.
  pub(crate) fn do_reconcile_received(who: &T::AccountId) -> Result<u32, DispatchError> {
    let mut member = Self::member_or_err(who)?;
    let ledger = Self::ledger_received(who);
    let old = member.help_received;
    if old != ledger {
      log::warn!(
        target: crate::LOG_TARGET,
        "help_received drift for {:?}: counter {}, ledger {}",
        who,
        old,
        ledger,
      );
      member.help_received = ledger;
      Members::<T>::insert(who, member);
      Self::deposit_event(Event::HelpReceivedReconciled {
        who: who.clone(),
        old,
        new: ledger,
      });
    }
    Ok(ledger)
  }
}
