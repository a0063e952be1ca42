use crate as pallet_helping_plan;
use crate::{HelpNotice, HelpNotifier, Moment, Tier};
use polkadot_sdk::frame_support::{
  construct_runtime,
  traits::{ConstU32, ConstU64, EnsureOrigin, UnixTime},
};
use polkadot_sdk::frame_system::{EnsureRoot, RawOrigin};
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  traits::{BlakeTwo256, IdentityLookup},
};

use core::cell::RefCell;
use core::time::Duration;

type Block = polkadot_sdk::frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;

pub const MATCHER: AccountId = 100;
pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const CHARLIE: AccountId = 3;
pub const DAVE: AccountId = 4;
pub const EVE: AccountId = 5;
pub const FERDIE: AccountId = 6;

pub const HOUR: Moment = primitives::params::HOUR_MILLIS;
/// Clock value every test starts from.
pub const GENESIS_TIME: Moment = 1_700_000_000_000;

construct_runtime!(
  pub enum Test {
    System: polkadot_sdk::frame_system,
    HelpingPlan: pallet_helping_plan,
  }
);

impl polkadot_sdk::frame_system::Config for Test {
  type BaseCallFilter = polkadot_sdk::frame_support::traits::Everything;
  type BlockWeights = ();
  type BlockLength = ();
  type DbWeight = ();
  type RuntimeOrigin = RuntimeOrigin;
  type RuntimeCall = RuntimeCall;
  type Nonce = u64;
  type Hash = polkadot_sdk::sp_core::H256;
  type Hashing = BlakeTwo256;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Block = Block;
  type RuntimeEvent = RuntimeEvent;
  type BlockHashCount = ConstU64<250>;
  type Version = ();
  type PalletInfo = PalletInfo;
  type AccountData = ();
  type OnNewAccount = ();
  type OnKilledAccount = ();
  type SystemWeightInfo = ();
  type SS58Prefix = ();
  type OnSetCode = ();
  type MaxConsumers = ConstU32<16>;
  type RuntimeTask = ();
  type ExtensionsWeightInfo = ();
  type SingleBlockMigrations = ();
  type MultiBlockMigrator = ();
  type PreInherents = ();
  type PostInherents = ();
  type PostTransactions = ();
}

thread_local! {
  static NOW: RefCell<Moment> = const { RefCell::new(GENESIS_TIME) };
  static NOTICES: RefCell<Vec<(AccountId, HelpNotice)>> = const { RefCell::new(Vec::new()) };
  static NOTIFIER_DOWN: RefCell<bool> = const { RefCell::new(false) };
}

pub fn set_now(now: Moment) {
  NOW.with(|n| *n.borrow_mut() = now);
}

pub fn advance_time(by: Moment) {
  NOW.with(|n| *n.borrow_mut() += by);
}

pub fn notices() -> Vec<(AccountId, HelpNotice)> {
  NOTICES.with(|n| n.borrow().clone())
}

pub fn set_notifier_down(down: bool) {
  NOTIFIER_DOWN.with(|d| *d.borrow_mut() = down);
}

pub struct MockTime;
impl UnixTime for MockTime {
  fn now() -> Duration {
    Duration::from_millis(NOW.with(|n| *n.borrow()))
  }
}

/// Records every notice; fails without recording while switched off.
pub struct MockNotifier;
impl HelpNotifier<AccountId> for MockNotifier {
  fn notify(who: &AccountId, notice: HelpNotice) -> DispatchResult {
    if NOTIFIER_DOWN.with(|d| *d.borrow()) {
      return Err(DispatchError::Other("notifier offline"));
    }
    NOTICES.with(|n| n.borrow_mut().push((*who, notice)));
    Ok(())
  }
}

/// Only `MATCHER` may append assignments.
pub struct EnsureMatcher;
impl EnsureOrigin<RuntimeOrigin> for EnsureMatcher {
  type Success = AccountId;

  fn try_origin(o: RuntimeOrigin) -> Result<Self::Success, RuntimeOrigin> {
    let raw: Result<RawOrigin<AccountId>, RuntimeOrigin> = o.into();
    match raw {
      Ok(RawOrigin::Signed(who)) if who == MATCHER => Ok(who),
      Ok(other) => Err(other.into()),
      Err(o) => Err(o),
    }
  }

  #[cfg(feature = "runtime-benchmarks")]
  fn try_successful_origin() -> Result<RuntimeOrigin, ()> {
    Ok(RuntimeOrigin::signed(MATCHER))
  }
}

impl pallet_helping_plan::Config for Test {
  type AdminOrigin = EnsureRoot<AccountId>;
  type MatcherOrigin = EnsureMatcher;
  type UnixTime = MockTime;
  type Notifier = MockNotifier;
  type AssignmentSla = ConstU64<{ primitives::params::ASSIGNMENT_SLA_MILLIS }>;
  type MaxReceiverQueue = ConstU32<16>;
  type MaxSenderQueue = ConstU32<4>;
  type MaxAuditBatch = ConstU32<8>;
  type MinPaymentReferenceLen = ConstU32<{ primitives::params::MIN_PAYMENT_REFERENCE_LEN }>;
  type WeightInfo = ();
}

/// Members every test starts with, all on the entry tier.
pub fn default_members() -> Vec<(AccountId, Tier, Moment)> {
  [ALICE, BOB, CHARLIE, DAVE, EVE, FERDIE]
    .into_iter()
    .map(|who| (who, Tier::Star, GENESIS_TIME))
    .collect()
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  new_test_ext_with(default_members())
}

pub fn new_test_ext_with(members: Vec<(AccountId, Tier, Moment)>) -> polkadot_sdk::sp_io::TestExternalities {
  set_now(GENESIS_TIME);
  set_notifier_down(false);
  NOTICES.with(|n| n.borrow_mut().clear());

  let mut t = polkadot_sdk::frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  pallet_helping_plan::GenesisConfig::<Test> { members }
    .assimilate_storage(&mut t)
    .unwrap();

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| System::set_block_number(1));
  ext
}
