#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

/// The range of component `n` is `[1, 8]`: members named by one audit call.
/// The range of component `q` is `[3, 15]`: records in one receiver queue.
pub trait WeightInfo {
	fn register_member() -> Weight;
	fn set_member_flags() -> Weight;
	fn set_receiving_visibility() -> Weight;
	fn create_assignment() -> Weight;
	fn request_payment() -> Weight;
	fn submit_payment() -> Weight;
	fn confirm_payment(q: u32) -> Weight;
	fn dispute_payment() -> Weight;
	fn cancel_assignment() -> Weight;
	fn force_confirm(q: u32) -> Weight;
	fn reject_dispute() -> Weight;
	fn set_assignment_hidden(q: u32) -> Weight;
	fn remove_excess(q: u32) -> Weight;
	fn remove_all_excess(n: u32, q: u32) -> Weight;
	fn cleanup_invalid_receivers(n: u32, q: u32) -> Weight;
	fn remove_assignment(q: u32) -> Weight;
	fn reconcile_received(q: u32) -> Weight;
	fn repair_over_quota(q: u32) -> Weight;
	fn check_and_seal(q: u32) -> Weight;
	fn promote_member(q: u32) -> Weight;
	fn release_milestone_hold() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn register_member() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_member_flags() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_receiving_visibility() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn create_assignment() -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(4))
	}
	fn request_payment() -> Weight {
		Weight::from_parts(25_000_000, 2500)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn submit_payment() -> Weight {
		Weight::from_parts(30_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn confirm_payment(q: u32) -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(4))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(3))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(q.into())))
	}
	fn dispute_payment() -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn cancel_assignment() -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn force_confirm(q: u32) -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(4))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(3))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(q.into())))
	}
	fn reject_dispute() -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_assignment_hidden(q: u32) -> Weight {
		Weight::from_parts(35_000_000, 3500)
			.saturating_add(Weight::from_parts(3_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn remove_excess(q: u32) -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(Weight::from_parts(12_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(2))
			.saturating_add(T::DbWeight::get().writes((3_u64).saturating_mul(q.into())))
	}
	fn remove_all_excess(n: u32, q: u32) -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(Weight::from_parts(30_000_000, 0).saturating_mul(n.into()))
			.saturating_add(Weight::from_parts(12_000_000, 0).saturating_mul(n.into()).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(n.into())))
			.saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(n.into()).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes((2_u64).saturating_mul(n.into())))
			.saturating_add(T::DbWeight::get().writes((3_u64).saturating_mul(n.into()).saturating_mul(q.into())))
	}
	fn cleanup_invalid_receivers(n: u32, q: u32) -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(Weight::from_parts(30_000_000, 0).saturating_mul(n.into()))
			.saturating_add(Weight::from_parts(12_000_000, 0).saturating_mul(n.into()).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(n.into())))
			.saturating_add(T::DbWeight::get().reads((3_u64).saturating_mul(n.into()).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes((2_u64).saturating_mul(n.into())))
			.saturating_add(T::DbWeight::get().writes((3_u64).saturating_mul(n.into()).saturating_mul(q.into())))
	}
	fn remove_assignment(q: u32) -> Weight {
		Weight::from_parts(35_000_000, 3500)
			.saturating_add(Weight::from_parts(3_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(4))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(4))
	}
	fn reconcile_received(q: u32) -> Weight {
		Weight::from_parts(30_000_000, 3000)
			.saturating_add(Weight::from_parts(3_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn repair_over_quota(q: u32) -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(Weight::from_parts(8_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().reads((2_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(2))
			.saturating_add(T::DbWeight::get().writes((2_u64).saturating_mul(q.into())))
	}
	fn check_and_seal(q: u32) -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(1))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(q.into())))
	}
	fn promote_member(q: u32) -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(Weight::from_parts(5_000_000, 0).saturating_mul(q.into()))
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(q.into())))
			.saturating_add(T::DbWeight::get().writes(1))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(q.into())))
	}
	fn release_milestone_hold() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn register_member() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(RocksDbWeight::get().reads_writes(1, 1))
	}
	fn set_member_flags() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(RocksDbWeight::get().reads_writes(1, 1))
	}
	fn set_receiving_visibility() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(RocksDbWeight::get().reads_writes(1, 1))
	}
	fn create_assignment() -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(RocksDbWeight::get().reads_writes(5, 4))
	}
	fn request_payment() -> Weight {
		Weight::from_parts(25_000_000, 2500)
			.saturating_add(RocksDbWeight::get().reads_writes(2, 1))
	}
	fn submit_payment() -> Weight {
		Weight::from_parts(30_000_000, 3000)
			.saturating_add(RocksDbWeight::get().reads_writes(2, 2))
	}
	fn confirm_payment(q: u32) -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(4, 3))
			.saturating_add(RocksDbWeight::get().reads_writes((1_u64).saturating_mul(q.into()), (1_u64).saturating_mul(q.into())))
	}
	fn dispute_payment() -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(RocksDbWeight::get().reads_writes(1, 1))
	}
	fn cancel_assignment() -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(RocksDbWeight::get().reads_writes(1, 1))
	}
	fn force_confirm(q: u32) -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(4, 3))
			.saturating_add(RocksDbWeight::get().reads_writes((1_u64).saturating_mul(q.into()), (1_u64).saturating_mul(q.into())))
	}
	fn reject_dispute() -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(RocksDbWeight::get().reads_writes(1, 1))
	}
	fn set_assignment_hidden(q: u32) -> Weight {
		Weight::from_parts(35_000_000, 3500)
			.saturating_add(Weight::from_parts(3_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(3, 2))
			.saturating_add(RocksDbWeight::get().reads_writes((1_u64).saturating_mul(q.into()), (0_u64).saturating_mul(q.into())))
	}
	fn remove_excess(q: u32) -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(Weight::from_parts(12_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(3, 2))
			.saturating_add(RocksDbWeight::get().reads_writes((3_u64).saturating_mul(q.into()), (3_u64).saturating_mul(q.into())))
	}
	fn remove_all_excess(n: u32, q: u32) -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(Weight::from_parts(30_000_000, 0).saturating_mul(n.into()))
			.saturating_add(Weight::from_parts(12_000_000, 0).saturating_mul(n.into()).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes((3_u64).saturating_mul(n.into()), (2_u64).saturating_mul(n.into())))
			.saturating_add(RocksDbWeight::get().reads_writes((3_u64).saturating_mul(n.into()).saturating_mul(q.into()), (3_u64).saturating_mul(n.into()).saturating_mul(q.into())))
	}
	fn cleanup_invalid_receivers(n: u32, q: u32) -> Weight {
		Weight::from_parts(20_000_000, 2000)
			.saturating_add(Weight::from_parts(30_000_000, 0).saturating_mul(n.into()))
			.saturating_add(Weight::from_parts(12_000_000, 0).saturating_mul(n.into()).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes((3_u64).saturating_mul(n.into()), (2_u64).saturating_mul(n.into())))
			.saturating_add(RocksDbWeight::get().reads_writes((3_u64).saturating_mul(n.into()).saturating_mul(q.into()), (3_u64).saturating_mul(n.into()).saturating_mul(q.into())))
	}
	fn remove_assignment(q: u32) -> Weight {
		Weight::from_parts(35_000_000, 3500)
			.saturating_add(Weight::from_parts(3_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(4, 4))
			.saturating_add(RocksDbWeight::get().reads_writes((1_u64).saturating_mul(q.into()), (0_u64).saturating_mul(q.into())))
	}
	fn reconcile_received(q: u32) -> Weight {
		Weight::from_parts(30_000_000, 3000)
			.saturating_add(Weight::from_parts(3_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(2, 1))
			.saturating_add(RocksDbWeight::get().reads_writes((1_u64).saturating_mul(q.into()), (0_u64).saturating_mul(q.into())))
	}
	fn repair_over_quota(q: u32) -> Weight {
		Weight::from_parts(60_000_000, 6000)
			.saturating_add(Weight::from_parts(8_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(3, 2))
			.saturating_add(RocksDbWeight::get().reads_writes((2_u64).saturating_mul(q.into()), (2_u64).saturating_mul(q.into())))
	}
	fn check_and_seal(q: u32) -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(2, 1))
			.saturating_add(RocksDbWeight::get().reads_writes((1_u64).saturating_mul(q.into()), (1_u64).saturating_mul(q.into())))
	}
	fn promote_member(q: u32) -> Weight {
		Weight::from_parts(40_000_000, 4000)
			.saturating_add(Weight::from_parts(5_000_000, 0).saturating_mul(q.into()))
			.saturating_add(RocksDbWeight::get().reads_writes(2, 1))
			.saturating_add(RocksDbWeight::get().reads_writes((1_u64).saturating_mul(q.into()), (1_u64).saturating_mul(q.into())))
	}
	fn release_milestone_hold() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(RocksDbWeight::get().reads_writes(1, 1))
	}
}
