use crate::*;
use alloc::{format, vec::Vec};
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::BoundedVec;
use polkadot_sdk::frame_system::RawOrigin;

const SEED: u32 = 0;

fn member<T: Config>(name: &'static str, index: u32, tier: Tier) -> T::AccountId {
  let who: T::AccountId = account(name, index, SEED);
  Members::<T>::insert(&who, MemberInfo::new(tier, 0));
  who
}

fn method() -> PaymentMethod {
  BoundedVec::truncate_from(b"UPI".to_vec())
}

fn reference(id: AssignmentId) -> PaymentReference {
  BoundedVec::truncate_from(format!("UTR{id:08}").into_bytes())
}

fn linked<T: Config>(sender: &T::AccountId, receiver: &T::AccountId) -> AssignmentId {
  Pallet::<T>::do_create_assignment(
    sender.clone(),
    receiver.clone(),
    primitives::SEED_PAYMENT_AMOUNT,
  )
  .expect("link failed")
}

/// A link whose payment evidence has been submitted.
fn paid<T: Config>(sender: &T::AccountId, receiver: &T::AccountId) -> AssignmentId {
  let id = linked::<T>(sender, receiver);
  Pallet::<T>::do_request_payment(receiver, id).expect("request failed");
  Pallet::<T>::do_submit_payment(sender, id, method(), reference(id), None)
    .expect("submit failed");
  id
}

fn confirmed<T: Config>(sender: &T::AccountId, receiver: &T::AccountId) -> AssignmentId {
  let id = paid::<T>(sender, receiver);
  Pallet::<T>::do_confirm_payment(receiver, id).expect("confirm failed");
  id
}

/// Pad `receiver`'s queue up to `len` records with fresh links from distinct senders.
fn fill<T: Config>(receiver: &T::AccountId, len: u32) {
  let start = ReceiverQueue::<T>::get(receiver).len() as u32;
  for i in start..len {
    let sender = member::<T>("filler", i, Tier::Star);
    linked::<T>(&sender, receiver);
  }
}

fn reason() -> OverrideReason {
  BoundedVec::truncate_from(b"bank statement checked".to_vec())
}

/// Confirmed record that neither bumped the counter nor carries a confirmation time.
fn imported<T: Config>(sender: &T::AccountId, receiver: &T::AccountId) -> AssignmentId {
  let id = linked::<T>(sender, receiver);
  Assignments::<T>::mutate(id, |maybe| {
    if let Some(record) = maybe {
      record.status = HelpStatus::Confirmed;
      record.confirmed_by_receiver = true;
    }
  });
  id
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn register_member() {
    let who: T::AccountId = account("member", 0, SEED);

    #[extrinsic_call]
    register_member(RawOrigin::Root, who.clone(), Tier::Star);

    assert!(Members::<T>::contains_key(&who));
  }

  #[benchmark]
  fn set_member_flags() {
    let who = member::<T>("member", 0, Tier::Star);

    #[extrinsic_call]
    set_member_flags(RawOrigin::Root, who.clone(), true, true);

    assert!(Members::<T>::get(&who).is_some_and(|m| m.is_blocked));
  }

  #[benchmark]
  fn set_receiving_visibility() {
    let who = member::<T>("member", 0, Tier::Star);

    #[extrinsic_call]
    set_receiving_visibility(RawOrigin::Root, who.clone(), false);

    assert!(Members::<T>::get(&who).is_some_and(|m| m.is_receiving_held));
  }

  #[benchmark]
  fn create_assignment() -> Result<(), BenchmarkError> {
    let origin =
      T::MatcherOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);

    #[extrinsic_call]
    create_assignment(
      origin as T::RuntimeOrigin,
      sender.clone(),
      receiver,
      primitives::SEED_PAYMENT_AMOUNT,
    );

    assert_eq!(SenderQueue::<T>::get(&sender).len(), 1);
    Ok(())
  }

  #[benchmark]
  fn request_payment() {
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let id = linked::<T>(&sender, &receiver);

    #[extrinsic_call]
    request_payment(RawOrigin::Signed(receiver), id);
  }

  #[benchmark]
  fn submit_payment() {
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let id = linked::<T>(&sender, &receiver);
    Pallet::<T>::do_request_payment(&receiver, id).expect("request failed");
    let proof = BoundedVec::truncate_from(b"ipfs://proof".to_vec());

    #[extrinsic_call]
    submit_payment(
      RawOrigin::Signed(sender),
      id,
      method(),
      reference(id),
      Some(proof),
    );
  }

  // Worst case: the confirmation completes the quota and seals a receiver holding `q` records.
  #[benchmark]
  fn confirm_payment(q: Linear<3, 15>) {
    let receiver = member::<T>("receiver", 0, Tier::Star);
    for i in 0..2 {
      let sender = member::<T>("sender", i, Tier::Star);
      confirmed::<T>(&sender, &receiver);
    }
    let last = member::<T>("sender", 2, Tier::Star);
    let id = paid::<T>(&last, &receiver);
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    confirm_payment(RawOrigin::Signed(receiver.clone()), id);

    assert!(Members::<T>::get(&receiver).is_some_and(|m| m.is_on_hold));
  }

  #[benchmark]
  fn dispute_payment() {
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let id = paid::<T>(&sender, &receiver);

    #[extrinsic_call]
    dispute_payment(RawOrigin::Signed(receiver), id);
  }

  #[benchmark]
  fn cancel_assignment() {
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let id = linked::<T>(&sender, &receiver);

    #[extrinsic_call]
    cancel_assignment(RawOrigin::Signed(sender), id);
  }

  #[benchmark]
  fn force_confirm(q: Linear<3, 15>) {
    let receiver = member::<T>("receiver", 0, Tier::Star);
    for i in 0..2 {
      let sender = member::<T>("sender", i, Tier::Star);
      confirmed::<T>(&sender, &receiver);
    }
    let last = member::<T>("sender", 2, Tier::Star);
    let id = linked::<T>(&last, &receiver);
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    force_confirm(RawOrigin::Root, id, receiver.clone(), reason());

    assert!(Members::<T>::get(&receiver).is_some_and(|m| m.is_on_hold));
  }

  #[benchmark]
  fn reject_dispute() {
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let id = paid::<T>(&sender, &receiver);
    Pallet::<T>::do_dispute_payment(&receiver, id).expect("dispute failed");

    #[extrinsic_call]
    reject_dispute(RawOrigin::Root, id);
  }

  #[benchmark]
  fn set_assignment_hidden(q: Linear<1, 15>) {
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let id = confirmed::<T>(&sender, &receiver);
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    set_assignment_hidden(RawOrigin::Root, id, true);
  }

  #[benchmark]
  fn remove_excess(q: Linear<4, 15>) {
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let quota = Tier::Star.quota();
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    remove_excess(RawOrigin::Root, receiver.clone());

    assert_eq!(ReceiverQueue::<T>::get(&receiver).len() as u32, quota);
  }

  #[benchmark]
  fn remove_all_excess(n: Linear<1, 8>, q: Linear<4, 15>) {
    let mut receivers = Vec::new();
    for r in 0..n {
      let receiver = member::<T>("receiver", r, Tier::Star);
      for i in 0..q {
        let sender = member::<T>("sender", r * 100 + i, Tier::Star);
        linked::<T>(&sender, &receiver);
      }
      receivers.push(receiver);
    }
    let batch = BoundedVec::truncate_from(receivers);

    #[extrinsic_call]
    remove_all_excess(RawOrigin::Root, batch);

    assert!(Pallet::<T>::detect_exceeded().is_empty());
  }

  #[benchmark]
  fn cleanup_invalid_receivers(n: Linear<1, 8>, q: Linear<1, 15>) {
    let mut members = Vec::new();
    for r in 0..n {
      let receiver = member::<T>("receiver", r, Tier::Star);
      for i in 0..q {
        let sender = member::<T>("sender", r * 100 + i, Tier::Star);
        linked::<T>(&sender, &receiver);
      }
      Members::<T>::mutate(&receiver, |maybe| {
        if let Some(m) = maybe {
          m.is_blocked = true;
        }
      });
      members.push(receiver);
    }
    let batch = BoundedVec::truncate_from(members);

    #[extrinsic_call]
    cleanup_invalid_receivers(RawOrigin::Root, batch);

    assert!(Pallet::<T>::invalid_receivers().is_empty());
  }

  #[benchmark]
  fn remove_assignment(q: Linear<1, 15>) {
    let sender = member::<T>("sender", 0, Tier::Star);
    let receiver = member::<T>("receiver", 0, Tier::Star);
    let id = confirmed::<T>(&sender, &receiver);
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    remove_assignment(RawOrigin::Root, id);

    assert!(!Assignments::<T>::contains_key(id));
  }

  #[benchmark]
  fn reconcile_received(q: Linear<2, 15>) {
    let receiver = member::<T>("receiver", 0, Tier::Star);
    for i in 0..2 {
      let sender = member::<T>("sender", i, Tier::Star);
      imported::<T>(&sender, &receiver);
    }
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    reconcile_received(RawOrigin::Root, receiver.clone());

    assert_eq!(Members::<T>::get(&receiver).map(|m| m.help_received), Some(2));
  }

  // Every record is a surplus confirmation past the third.
  #[benchmark]
  fn repair_over_quota(q: Linear<4, 15>) {
    let receiver = member::<T>("receiver", 0, Tier::Star);
    for i in 0..q {
      let sender = member::<T>("sender", i, Tier::Star);
      imported::<T>(&sender, &receiver);
    }

    #[extrinsic_call]
    repair_over_quota(RawOrigin::Root, receiver.clone());

    assert!(Members::<T>::get(&receiver).is_some_and(|m| m.is_on_hold));
  }

  #[benchmark]
  fn check_and_seal(q: Linear<3, 15>) {
    let receiver = member::<T>("receiver", 0, Tier::Star);
    for i in 0..Tier::Star.quota() {
      let sender = member::<T>("sender", i, Tier::Star);
      imported::<T>(&sender, &receiver);
    }
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    check_and_seal(RawOrigin::Root, receiver.clone());

    assert!(Members::<T>::get(&receiver).is_some_and(|m| m.is_on_hold));
  }

  // Records past the quota are still open and get cancelled.
  #[benchmark]
  fn promote_member(q: Linear<3, 15>) {
    let receiver = member::<T>("receiver", 0, Tier::Star);
    for i in 0..Tier::Star.quota() {
      let sender = member::<T>("sender", i, Tier::Star);
      confirmed::<T>(&sender, &receiver);
    }
    fill::<T>(&receiver, q);

    #[extrinsic_call]
    promote_member(RawOrigin::Root, receiver.clone());

    assert_eq!(Members::<T>::get(&receiver).map(|m| m.tier), Some(Tier::Silver));
  }

  #[benchmark]
  fn release_milestone_hold() {
    let who = member::<T>("member", 0, Tier::Silver);
    Members::<T>::mutate(&who, |maybe| {
      if let Some(m) = maybe {
        m.help_received = 4;
        m.reach_milestone();
      }
    });

    #[extrinsic_call]
    release_milestone_hold(RawOrigin::Root, who.clone());

    assert!(Members::<T>::get(&who).is_some_and(|m| m.can_receive()));
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
