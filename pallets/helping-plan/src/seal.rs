//! Auto-seal, milestone holds and tier promotion.

use crate::pallet::*;
use crate::types::*;
use alloc::vec::Vec;
use frame::prelude::*;

impl<T: Config> Pallet<T> {
  /// Seal `who`'s receiver queue once the ledger holds exactly `quota` confirmed helps.
  ///
  /// Sealing pins the counter to the quota, holds the member and stamps any counted record that
  /// still lacks a confirmation time. Calling it again on a sealed member writes nothing.
  pub fn do_check_and_seal(who: &T::AccountId) -> Result<SealOutcome, DispatchError> {
    let mut member = Self::member_or_err(who)?;
    let quota = member.quota();
    let (records, _) = Self::receiver_records(who);
    let counted: Vec<_> = records
      .into_iter()
      .filter(|(_, r)| r.counts_as_received())
      .collect();
    let count = counted.len() as u32;

    if count < quota {
      return Ok(SealOutcome::Open);
    }
    if count > quota {
      log::warn!(
        target: crate::LOG_TARGET,
        "{:?} holds {} confirmed helps on a quota of {}, not sealing",
        who,
        count,
        quota,
      );
      return Ok(SealOutcome::OverQuota);
    }

    let unstamped: Vec<_> = counted
      .into_iter()
      .filter(|(_, r)| r.confirmation_time.is_none())
      .collect();
    let already_sealed =
      member.help_received == quota && member.is_on_hold && member.is_receiving_held;
    if already_sealed && unstamped.is_empty() {
      return Ok(SealOutcome::AlreadySealed);
    }

    let now = Self::now();
    let finalized = unstamped.len() as u32;
    for (id, mut record) in unstamped {
      record.mark_confirmed(now, ConfirmationSource::Seal);
      Assignments::<T>::insert(id, record);
    }
    member.help_received = quota;
    member.is_on_hold = true;
    member.is_receiving_held = true;
    Members::<T>::insert(who, &member);

    log::info!(
      target: crate::LOG_TARGET,
      "sealed {:?} on {:?} ({} records finalized)",
      who,
      member.tier,
      finalized,
    );
    Self::deposit_event(Event::MemberSealed {
      who: who.clone(),
      tier: member.tier,
      finalized,
    });
    Self::notify(who, HelpNotice::QueueSealed);
    Ok(SealOutcome::Sealed)
  }

  /// Move a sealed member to the next tier.
  ///
  /// The finished tier's receiver records are archived (hidden), so the new tier starts from an
  /// empty count. Links still open on the old tier are cancelled first; an archived record can
  /// never be confirmed into the new tier's counter.
  pub(crate) fn do_promote_member(who: &T::AccountId) -> DispatchResult {
    let mut member = Self::member_or_err(who)?;
    ensure!(member.is_sealed(), Error::<T>::NotSealed);
    ensure!(
      member.milestone_due.is_none(),
      Error::<T>::MilestonePaymentPending
    );
    let from = member.tier;
    let to = from.next().ok_or(Error::<T>::MaxTierReached)?;

    for id in ReceiverQueue::<T>::get(who) {
      let Some(mut record) = Assignments::<T>::get(id) else {
        continue;
      };
      if !record.status.is_terminal() {
        let status = record.status;
        record.status = HelpStatus::Cancelled;
        Self::deposit_event(Event::StatusChanged {
          id,
          from: status,
          to: HelpStatus::Cancelled,
        });
        Self::notify(&record.sender, HelpNotice::AssignmentCancelled(id));
      }
      record.is_hidden = true;
      Assignments::<T>::insert(id, record);
    }
    member.tier = to;
    member.help_received = 0;
    member.is_on_hold = false;
    member.is_receiving_held = false;
    member.help_visibility = true;
    Members::<T>::insert(who, member);

    log::info!(target: crate::LOG_TARGET, "promoted {:?}: {:?} -> {:?}", who, from, to);
    Self::deposit_event(Event::MemberPromoted {
      who: who.clone(),
      from,
      to,
    });
    Self::notify(who, HelpNotice::Promoted(to));
    Ok(())
  }

  /// Resume receiving once the member settled the milestone payment off-chain.
  pub(crate) fn do_release_milestone_hold(who: &T::AccountId) -> DispatchResult {
    let mut member = Self::member_or_err(who)?;
    let due = member
      .release_milestone()
      .ok_or(Error::<T>::NoMilestoneHold)?;
    Members::<T>::insert(who, &member);

    log::info!(
      target: crate::LOG_TARGET,
      "released {:?} from its {:?} milestone",
      who,
      due.kind,
    );
    Self::deposit_event(Event::MilestoneHoldReleased {
      who: who.clone(),
      kind: due.kind,
      amount: due.amount,
    });
    Self::notify(who, HelpNotice::HoldReleased);
    Ok(())
  }
}
