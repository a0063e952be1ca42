//! Helping Plan Pallet
//!
//! Peer-to-peer help ledger for a tiered helping plan. Members sit on capacity-bounded tiers and
//! must collect a fixed number of confirmed helps from other members before they are sealed and
//! promoted. The pallet records who was matched to whom, drives every match through a payment
//! confirmation lifecycle, seals a receiver's queue the moment its quota is met and explains why
//! a receiver is not progressing.
//!
//! The pallet never moves funds. Payments happen off-chain; the ledger only stores attestations.
//!
//! ## Layout
//!
//! - `ledger`: record store and its receiver/sender projections.
//! - `lifecycle`: the payment confirmation state machine.
//! - `seal`: auto-seal, milestone holds and tier promotion.
//! - `auditor`: over-assignment detection, trimming and counter reconciliation.
//! - `diagnostics`: read-only leakage analysis.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod auditor;
pub mod diagnostics;
pub mod ledger;
pub mod lifecycle;
pub mod seal;
pub mod types;
pub use types::*;

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub const LOG_TARGET: &str = "runtime::helping-plan";

/// Outbound notification channel (push messages to members).
///
/// Delivery is best-effort: a failing notifier is logged and never reverts the call that
/// triggered it.
pub trait HelpNotifier<AccountId> {
  fn notify(who: &AccountId, notice: HelpNotice) -> frame::deps::sp_runtime::DispatchResult;
}

impl<AccountId> HelpNotifier<AccountId> for () {
  fn notify(_who: &AccountId, _notice: HelpNotice) -> frame::deps::sp_runtime::DispatchResult {
    Ok(())
  }
}

#[frame::pallet]
pub mod pallet {
  use crate::{HelpNotifier, weights::WeightInfo as _};
  use crate::types::*;
  use alloc::vec::Vec;
  use frame::prelude::*;
  use polkadot_sdk::frame_support::traits::{EnsureOrigin, UnixTime};

  pub type AssignmentRecordOf<T> = AssignmentRecord<<T as frame_system::Config>::AccountId>;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Operator origin for overrides, audits and member administration.
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Origin of the external matcher that links senders to receivers.
    type MatcherOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Wall clock, read in milliseconds.
    type UnixTime: UnixTime;

    type Notifier: HelpNotifier<Self::AccountId>;

    /// How long an entry member may wait for a full set of senders (ms).
    #[pallet::constant]
    type AssignmentSla: Get<Moment>;

    #[pallet::constant]
    type MaxReceiverQueue: Get<u32>;

    #[pallet::constant]
    type MaxSenderQueue: Get<u32>;

    /// Members a single audit call may name.
    #[pallet::constant]
    type MaxAuditBatch: Get<u32>;

    /// Minimum length of a normalized payment reference.
    #[pallet::constant]
    type MinPaymentReferenceLen: Get<u32>;

    type WeightInfo: crate::weights::WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  #[pallet::storage]
  #[pallet::getter(fn member)]
  pub type Members<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, MemberInfo, OptionQuery>;

  /// The single source of truth for every sender -> receiver link.
  #[pallet::storage]
  #[pallet::getter(fn assignment)]
  pub type Assignments<T: Config> =
    StorageMap<_, Blake2_128Concat, AssignmentId, AssignmentRecordOf<T>, OptionQuery>;

  /// Receiver-side view of `Assignments`, in ledger order.
  #[pallet::storage]
  #[pallet::getter(fn receiver_queue)]
  pub type ReceiverQueue<T: Config> = StorageMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    BoundedVec<AssignmentId, T::MaxReceiverQueue>,
    ValueQuery,
  >;

  /// Sender-side view of `Assignments`, in ledger order.
  #[pallet::storage]
  #[pallet::getter(fn sender_queue)]
  pub type SenderQueue<T: Config> = StorageMap<
    _,
    Blake2_128Concat,
    T::AccountId,
    BoundedVec<AssignmentId, T::MaxSenderQueue>,
    ValueQuery,
  >;

  #[pallet::storage]
  #[pallet::getter(fn next_assignment_id)]
  pub type NextAssignmentId<T> = StorageValue<_, AssignmentId, ValueQuery>;

  /// Every payment reference ever submitted, with the assignment it was first used on.
  #[pallet::storage]
  pub type PaymentReferences<T: Config> =
    StorageMap<_, Blake2_128Concat, PaymentReference, AssignmentId, OptionQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    MemberRegistered {
      who: T::AccountId,
      tier: Tier,
    },
    MemberFlagsUpdated {
      who: T::AccountId,
      is_blocked: bool,
      payment_blocked: bool,
    },
    ReceivingVisibilityChanged {
      who: T::AccountId,
      visible: bool,
    },
    AssignmentCreated {
      id: AssignmentId,
      sender: T::AccountId,
      receiver: T::AccountId,
      amount: Balance,
    },
    StatusChanged {
      id: AssignmentId,
      from: HelpStatus,
      to: HelpStatus,
    },
    PaymentSubmitted {
      id: AssignmentId,
      reference: PaymentReference,
    },
    PaymentConfirmed {
      id: AssignmentId,
      receiver: T::AccountId,
      via: ConfirmationSource,
      help_received: u32,
    },
    /// An operator confirmed a help on the receiver's behalf.
    ForceConfirmed {
      id: AssignmentId,
      receiver: T::AccountId,
      reason: OverrideReason,
    },
    /// Receiving paused until the member settles a milestone payment.
    MilestoneReached {
      who: T::AccountId,
      kind: MilestoneKind,
      amount: Balance,
    },
    MilestoneHoldReleased {
      who: T::AccountId,
      kind: MilestoneKind,
      amount: Balance,
    },
    /// A link was deleted. The sender is free to be matched again.
    AssignmentRemoved {
      id: AssignmentId,
      sender: T::AccountId,
      receiver: T::AccountId,
    },
    ExcessRemoved {
      receiver: T::AccountId,
      removed: u32,
    },
    InvalidReceiversCleaned {
      members: u32,
      removed: u32,
    },
    AssignmentVisibilityChanged {
      id: AssignmentId,
      hidden: bool,
    },
    HelpReceivedReconciled {
      who: T::AccountId,
      old: u32,
      new: u32,
    },
    OverQuotaRepaired {
      who: T::AccountId,
      hidden: u32,
    },
    MemberSealed {
      who: T::AccountId,
      tier: Tier,
      finalized: u32,
    },
    MemberPromoted {
      who: T::AccountId,
      from: Tier,
      to: Tier,
    },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// The receiver already collected every help its tier allows.
    QuotaAlreadyMet,
    /// The requested status change is not allowed from the current status.
    InvalidTransition,
    AlreadyConfirmed,
    /// The assignment was archived and can no longer change.
    AssignmentHidden,
    /// The assignment belongs to a different receiver.
    ReceiverMismatch,
    NotReceiver,
    NotSender,
    NotParticipant,
    /// Blocked, held, payment-blocked or out of quota.
    ReceiverNotEligible,
    PaymentReferenceTooShort,
    PaymentReferenceAlreadyUsed,
    /// The receiver holds no more records than its quota.
    QuotaNotExceeded,
    /// The ledger holds no more confirmed helps than the quota.
    NotOverQuota,
    NotSealed,
    MaxTierReached,
    /// A milestone payment is still outstanding.
    MilestonePaymentPending,
    NoMilestoneHold,
    MemberNotFound,
    MemberAlreadyRegistered,
    AssignmentNotFound,
    SelfAssignment,
    ZeroAmount,
    ReceiverQueueFull,
    SenderQueueFull,
    AssignmentIdOverflow,
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    /// Seeded members: account, tier and join time (ms).
    pub members: Vec<(T::AccountId, Tier, Moment)>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      for (who, tier, joined_at) in &self.members {
        assert!(
          !Members::<T>::contains_key(who),
          "Duplicate member in helping plan genesis"
        );
        Members::<T>::insert(who, MemberInfo::new(*tier, *joined_at));
      }
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Register a member on the given tier.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::register_member())]
    pub fn register_member(origin: OriginFor<T>, who: T::AccountId, tier: Tier) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(
        !Members::<T>::contains_key(&who),
        Error::<T>::MemberAlreadyRegistered
      );
      Members::<T>::insert(&who, MemberInfo::new(tier, Self::now()));
      Self::deposit_event(Event::MemberRegistered { who, tier });
      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_member_flags())]
    pub fn set_member_flags(
      origin: OriginFor<T>,
      who: T::AccountId,
      is_blocked: bool,
      payment_blocked: bool,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Members::<T>::try_mutate(&who, |maybe| -> DispatchResult {
        let member = maybe.as_mut().ok_or(Error::<T>::MemberNotFound)?;
        member.is_blocked = is_blocked;
        member.payment_blocked = payment_blocked;
        Ok(())
      })?;
      Self::deposit_event(Event::MemberFlagsUpdated {
        who,
        is_blocked,
        payment_blocked,
      });
      Ok(())
    }

    /// Show or hide a member as a receiver. Hiding also holds receiving.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::set_receiving_visibility())]
    pub fn set_receiving_visibility(
      origin: OriginFor<T>,
      who: T::AccountId,
      visible: bool,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Members::<T>::try_mutate(&who, |maybe| -> DispatchResult {
        let member = maybe.as_mut().ok_or(Error::<T>::MemberNotFound)?;
        member.help_visibility = visible;
        member.is_receiving_held = !visible;
        Ok(())
      })?;
      Self::deposit_event(Event::ReceivingVisibilityChanged { who, visible });
      Ok(())
    }

    /// Link a sender to a receiver. Called by the external matcher.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::create_assignment())]
    pub fn create_assignment(
      origin: OriginFor<T>,
      sender: T::AccountId,
      receiver: T::AccountId,
      amount: Balance,
    ) -> DispatchResult {
      T::MatcherOrigin::ensure_origin(origin)?;
      Self::do_create_assignment(sender, receiver, amount).map(|_| ())
    }

    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::request_payment())]
    pub fn request_payment(origin: OriginFor<T>, id: AssignmentId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_request_payment(&who, id)
    }

    /// Attach payment evidence. `reference` is normalized before the uniqueness check.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::submit_payment())]
    pub fn submit_payment(
      origin: OriginFor<T>,
      id: AssignmentId,
      method: PaymentMethod,
      reference: PaymentReference,
      proof: Option<ProofPointer>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_submit_payment(&who, id, method, reference, proof)
    }

    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::confirm_payment(T::MaxReceiverQueue::get()))]
    pub fn confirm_payment(origin: OriginFor<T>, id: AssignmentId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_confirm_payment(&who, id)
    }

    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::dispute_payment())]
    pub fn dispute_payment(origin: OriginFor<T>, id: AssignmentId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_dispute_payment(&who, id)
    }

    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::cancel_assignment())]
    pub fn cancel_assignment(origin: OriginFor<T>, id: AssignmentId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_cancel_assignment(&who, id)
    }

    /// Operator override: confirm a help on the receiver's behalf.
    ///
    /// Refused once the receiver's counter reached its tier quota. Runs the seal check
    /// afterwards.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::force_confirm(T::MaxReceiverQueue::get()))]
    pub fn force_confirm(
      origin: OriginFor<T>,
      id: AssignmentId,
      receiver: T::AccountId,
      reason: OverrideReason,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_force_confirm(id, &receiver, reason)
    }

    /// Uphold a receiver's dispute.
    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::reject_dispute())]
    pub fn reject_dispute(origin: OriginFor<T>, id: AssignmentId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_reject_dispute(id)
    }

    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::set_assignment_hidden(T::MaxReceiverQueue::get()))]
    pub fn set_assignment_hidden(
      origin: OriginFor<T>,
      id: AssignmentId,
      hidden: bool,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_set_assignment_hidden(id, hidden)
    }

    /// Delete the receiver's records beyond its quota, newest first out.
    #[pallet::call_index(12)]
    #[pallet::weight(T::WeightInfo::remove_excess(T::MaxReceiverQueue::get()))]
    pub fn remove_excess(origin: OriginFor<T>, receiver: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_remove_excess(&receiver).map(|_| ())
    }

    /// Run `remove_excess` for each listed receiver. Receivers within quota are skipped.
    ///
    /// Candidates come from the off-chain `detect_exceeded` view.
    #[pallet::call_index(13)]
    #[pallet::weight(T::WeightInfo::remove_all_excess(
      receivers.len() as u32,
      T::MaxReceiverQueue::get(),
    ))]
    pub fn remove_all_excess(
      origin: OriginFor<T>,
      receivers: BoundedVec<T::AccountId, T::MaxAuditBatch>,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_remove_all_excess(&receivers).map(|_| ())
    }

    /// Drop unconfirmed receiver records of the listed members that are blocked, held or
    /// payment-blocked. Eligible members are skipped.
    #[pallet::call_index(14)]
    #[pallet::weight(T::WeightInfo::cleanup_invalid_receivers(
      members.len() as u32,
      T::MaxReceiverQueue::get(),
    ))]
    pub fn cleanup_invalid_receivers(
      origin: OriginFor<T>,
      members: BoundedVec<T::AccountId, T::MaxAuditBatch>,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_cleanup_invalid_receivers(&members).map(|_| ())
    }

    /// Delete one link, e.g. before the matcher reassigns the sender by hand.
    #[pallet::call_index(15)]
    #[pallet::weight(T::WeightInfo::remove_assignment(T::MaxReceiverQueue::get()))]
    pub fn remove_assignment(origin: OriginFor<T>, id: AssignmentId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_remove_assignment(id)
    }

    /// Recompute `help_received` from the ledger.
    #[pallet::call_index(16)]
    #[pallet::weight(T::WeightInfo::reconcile_received(T::MaxReceiverQueue::get()))]
    pub fn reconcile_received(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_reconcile_received(&who).map(|_| ())
    }

    #[pallet::call_index(17)]
    #[pallet::weight(T::WeightInfo::repair_over_quota(T::MaxReceiverQueue::get()))]
    pub fn repair_over_quota(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_repair_over_quota(&who).map(|_| ())
    }

    #[pallet::call_index(18)]
    #[pallet::weight(T::WeightInfo::check_and_seal(T::MaxReceiverQueue::get()))]
    pub fn check_and_seal(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_check_and_seal(&who).map(|_| ())
    }

    /// Move a sealed member to the next tier.
    #[pallet::call_index(19)]
    #[pallet::weight(T::WeightInfo::promote_member(T::MaxReceiverQueue::get()))]
    pub fn promote_member(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_promote_member(&who)
    }

    /// Lift the pause set by a milestone once its payment was settled.
    #[pallet::call_index(20)]
    #[pallet::weight(T::WeightInfo::release_milestone_hold())]
    pub fn release_milestone_hold(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::do_release_milestone_hold(&who)
    }
  }

  impl<T: Config> Pallet<T> {
    /// Current wall-clock time in milliseconds.
    pub fn now() -> Moment {
      Moment::try_from(T::UnixTime::now().as_millis()).unwrap_or(Moment::MAX)
    }

    pub(crate) fn notify(who: &T::AccountId, notice: HelpNotice) {
      if let Err(e) = T::Notifier::notify(who, notice.clone()) {
        log::warn!(
          target: crate::LOG_TARGET,
          "notifier failed for {:?}: {:?}",
          notice,
          e,
        );
      }
    }

    pub(crate) fn member_or_err(who: &T::AccountId) -> Result<MemberInfo, DispatchError> {
      Members::<T>::get(who).ok_or_else(|| Error::<T>::MemberNotFound.into())
    }
  }
}
