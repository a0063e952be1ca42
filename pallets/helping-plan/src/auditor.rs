//! Consistency auditor.
//!
//! Finds receivers holding more records than their quota allows and trims them, drops the
//! pending records of receivers that can no longer receive, and keeps `help_received` equal to
//! what the ledger actually shows. Every delete is followed by a reconciliation of the affected
//! receiver.

use crate::pallet::*;
use crate::types::*;
use alloc::vec::Vec;
use frame::prelude::*;

impl<T: Config> Pallet<T> {
  fn quota_of(who: &T::AccountId) -> u32 {
    Members::<T>::get(who)
      .map(|m| m.quota())
      .unwrap_or_else(|| primitives::ENTRY_TIER.quota())
  }

  fn exceeded(
    receiver: T::AccountId,
    ids: &[AssignmentId],
  ) -> Option<ExceededReceiver<T::AccountId>> {
    let assigned = ids
      .iter()
      .filter_map(|id| Assignments::<T>::get(id))
      .filter(|r| r.occupies_slot())
      .count() as u32;
    let quota = Self::quota_of(&receiver);
    (assigned > quota).then_some(ExceededReceiver {
      receiver,
      assigned,
      quota,
    })
  }

  /// Receivers whose non-hidden slot-occupying records outnumber their quota.
  ///
  /// Walks every receiver queue. Meant for off-chain callers picking the batch handed to
  /// `remove_all_excess`.
  pub fn detect_exceeded() -> Vec<ExceededReceiver<T::AccountId>> {
    ReceiverQueue::<T>::iter()
      .filter_map(|(receiver, ids)| Self::exceeded(receiver, &ids))
      .collect()
  }

  /// Delete the slot-occupying records past the `quota`-th, in ledger order.
  pub(crate) fn do_remove_excess(receiver: &T::AccountId) -> Result<u32, DispatchError> {
    let quota = Self::quota_of(receiver);
    let (records, _) = Self::receiver_records(receiver);
    let excess: Vec<AssignmentId> = records
      .iter()
      .filter(|(_, r)| r.occupies_slot())
      .skip(quota as usize)
      .map(|(id, _)| *id)
      .collect();
    ensure!(!excess.is_empty(), Error::<T>::QuotaNotExceeded);

    for id in &excess {
      Self::delete_assignment(*id)?;
    }
    let removed = excess.len() as u32;
    log::info!(
      target: crate::LOG_TARGET,
      "removed {} excess assignments from {:?}",
      removed,
      receiver,
    );
    Self::deposit_event(Event::ExcessRemoved {
      receiver: receiver.clone(),
      removed,
    });
    if Members::<T>::contains_key(receiver) {
      Self::do_reconcile_received(receiver)?;
    }
    Ok(removed)
  }

  /// `remove_excess` over the listed receivers that are over quota. Returns receivers trimmed.
  pub(crate) fn do_remove_all_excess(receivers: &[T::AccountId]) -> Result<u32, DispatchError> {
    let mut trimmed = 0u32;
    for receiver in receivers {
      let ids = ReceiverQueue::<T>::get(receiver);
      if Self::exceeded(receiver.clone(), &ids).is_none() {
        log::debug!(
          target: crate::LOG_TARGET,
          "{:?} is within quota, skipping",
          receiver,
        );
        continue;
      }
      Self::do_remove_excess(receiver)?;
      trimmed = trimmed.saturating_add(1);
    }
    Ok(trimmed)
  }

  /// Unconfirmed receiver-side records of members that are blocked, held or payment-blocked.
  fn invalid_receiver_records(who: &T::AccountId) -> Vec<AssignmentId> {
    let (records, _) = Self::receiver_records(who);
    records
      .into_iter()
      .filter(|(_, r)| r.status != HelpStatus::Confirmed)
      .map(|(id, _)| id)
      .collect()
  }

  /// Members that can no longer receive yet still hold unconfirmed receiver records.
  ///
  /// Walks every member. Meant for off-chain callers picking the batch handed to
  /// `cleanup_invalid_receivers`.
  pub fn invalid_receivers() -> Vec<T::AccountId> {
    Members::<T>::iter()
      .filter(|(_, member)| member.is_invalid_receiver())
      .map(|(who, _)| who)
      .filter(|who| !Self::invalid_receiver_records(who).is_empty())
      .collect()
  }

  /// Delete unconfirmed receiver records of the listed members that are invalid receivers.
  ///
  /// Confirmed records stay: they are attested history and back the counter.
  pub(crate) fn do_cleanup_invalid_receivers(
    candidates: &[T::AccountId],
  ) -> Result<(u32, u32), DispatchError> {
    let mut members = 0u32;
    let mut removed = 0u32;
    for who in candidates {
      if !Members::<T>::get(who).is_some_and(|m| m.is_invalid_receiver()) {
        continue;
      }
      let ids = Self::invalid_receiver_records(who);
      if ids.is_empty() {
        continue;
      }
      for id in ids {
        Self::delete_assignment(id)?;
        removed = removed.saturating_add(1);
      }
      Self::do_reconcile_received(who)?;
      members = members.saturating_add(1);
    }
    log::info!(
      target: crate::LOG_TARGET,
      "cleaned {} assignments across {} invalid receivers",
      removed,
      members,
    );
    Self::deposit_event(Event::InvalidReceiversCleaned { members, removed });
    Ok((members, removed))
  }

  pub(crate) fn do_remove_assignment(id: AssignmentId) -> DispatchResult {
    let record = Self::delete_assignment(id)?;
    if Members::<T>::contains_key(&record.receiver) {
      Self::do_reconcile_received(&record.receiver)?;
    }
    Ok(())
  }

  pub(crate) fn do_set_assignment_hidden(id: AssignmentId, hidden: bool) -> DispatchResult {
    let receiver = Assignments::<T>::try_mutate(id, |maybe| -> Result<_, DispatchError> {
      let record = maybe.as_mut().ok_or(Error::<T>::AssignmentNotFound)?;
      record.is_hidden = hidden;
      Ok(record.receiver.clone())
    })?;
    Self::deposit_event(Event::AssignmentVisibilityChanged { id, hidden });
    if Members::<T>::contains_key(&receiver) {
      Self::do_reconcile_received(&receiver)?;
    }
    Ok(())
  }

  /// Hide confirmed records past the `quota`-th, reconcile and re-run the seal check.
  pub(crate) fn do_repair_over_quota(who: &T::AccountId) -> Result<u32, DispatchError> {
    let quota = Self::member_or_err(who)?.quota();
    let (records, _) = Self::receiver_records(who);
    let surplus: Vec<AssignmentId> = records
      .iter()
      .filter(|(_, r)| r.counts_as_received())
      .skip(quota as usize)
      .map(|(id, _)| *id)
      .collect();
    ensure!(!surplus.is_empty(), Error::<T>::NotOverQuota);

    for id in &surplus {
      Assignments::<T>::mutate(id, |maybe| {
        if let Some(record) = maybe {
          record.is_hidden = true;
        }
      });
      Self::deposit_event(Event::AssignmentVisibilityChanged {
        id: *id,
        hidden: true,
      });
    }
    let hidden = surplus.len() as u32;
    log::info!(
      target: crate::LOG_TARGET,
      "hid {} surplus confirmations of {:?}",
      hidden,
      who,
    );
    Self::deposit_event(Event::OverQuotaRepaired {
      who: who.clone(),
      hidden,
    });
    Self::do_reconcile_received(who)?;
    Self::do_check_and_seal(who)?;
    Ok(hidden)
  }
}
