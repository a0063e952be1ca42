//! Capacity rule table for the helping plan.
//!
//! Every member sits on exactly one tier. A tier fixes how many confirmed helps the member
//! must receive before being sealed (its quota), the amount each of those helps carries, and
//! the tier the member moves to afterwards. Quotas grow monotonically along the tier order.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::ecosystem::Balance;

/// Ordered tier set. `Star` is the entry tier.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum Tier {
  #[default]
  Star,
  Silver,
  Gold,
  Platinum,
  Diamond,
}

/// The tier every new member starts on.
pub const ENTRY_TIER: Tier = Tier::Star;

/// Amount of the outbound seed help an entry member must complete before receiving.
pub const SEED_PAYMENT_AMOUNT: Balance = 300;

/// Tier order, lowest first.
pub const TIER_ORDER: [Tier; 5] = [
  Tier::Star,
  Tier::Silver,
  Tier::Gold,
  Tier::Platinum,
  Tier::Diamond,
];

/// What a member owes once their received count hits a milestone.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  PartialEq,
  TypeInfo,
)]
pub enum MilestoneKind {
  /// Payment towards the next tier.
  Upgrade,
  /// Payment to the member's sponsor (upline).
  Sponsor,
}

/// A received-count value at which receiving pauses until the member pays `amount`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Milestone {
  pub at_received: u32,
  pub kind: MilestoneKind,
  pub amount: Balance,
}

const SILVER_MILESTONES: &[Milestone] = &[
  Milestone {
    at_received: 4,
    kind: MilestoneKind::Upgrade,
    amount: 1_800,
  },
  Milestone {
    at_received: 7,
    kind: MilestoneKind::Sponsor,
    amount: 1_200,
  },
];

const GOLD_MILESTONES: &[Milestone] = &[
  Milestone {
    at_received: 11,
    kind: MilestoneKind::Upgrade,
    amount: 20_000,
  },
  Milestone {
    at_received: 25,
    kind: MilestoneKind::Sponsor,
    amount: 4_000,
  },
];

const PLATINUM_MILESTONES: &[Milestone] = &[
  Milestone {
    at_received: 11,
    kind: MilestoneKind::Upgrade,
    amount: 200_000,
  },
  Milestone {
    at_received: 80,
    kind: MilestoneKind::Sponsor,
    amount: 40_000,
  },
];

const DIAMOND_MILESTONES: &[Milestone] = &[Milestone {
  at_received: 242,
  kind: MilestoneKind::Sponsor,
  amount: 600_000,
}];

impl Tier {
  /// Number of confirmed helps a receiver on this tier must collect.
  pub const fn quota(self) -> u32 {
    match self {
      Tier::Star => 3,
      Tier::Silver => 9,
      Tier::Gold => 27,
      Tier::Platinum => 81,
      Tier::Diamond => 243,
    }
  }

  /// Amount carried by a single help on this tier.
  pub const fn help_amount(self) -> Balance {
    match self {
      Tier::Star => 300,
      Tier::Silver => 600,
      Tier::Gold => 2_000,
      Tier::Platinum => 20_000,
      Tier::Diamond => 200_000,
    }
  }

  pub const fn next(self) -> Option<Tier> {
    match self {
      Tier::Star => Some(Tier::Silver),
      Tier::Silver => Some(Tier::Gold),
      Tier::Gold => Some(Tier::Platinum),
      Tier::Platinum => Some(Tier::Diamond),
      Tier::Diamond => None,
    }
  }

  pub const fn is_entry(self) -> bool {
    matches!(self, Tier::Star)
  }

  /// Received-count milestones that pause receiving on this tier.
  pub const fn milestones(self) -> &'static [Milestone] {
    match self {
      Tier::Star => &[],
      Tier::Silver => SILVER_MILESTONES,
      Tier::Gold => GOLD_MILESTONES,
      Tier::Platinum => PLATINUM_MILESTONES,
      Tier::Diamond => DIAMOND_MILESTONES,
    }
  }

  /// Milestone matching an exact received count, if any.
  pub fn milestone_at(self, received: u32) -> Option<Milestone> {
    self
      .milestones()
      .iter()
      .find(|m| m.at_received == received)
      .copied()
  }

  /// Resolve a tier by name. Unknown names resolve to the entry tier.
  pub fn from_name(name: &[u8]) -> Tier {
    match name {
      b"Star" => Tier::Star,
      b"Silver" => Tier::Silver,
      b"Gold" => Tier::Gold,
      b"Platinum" => Tier::Platinum,
      b"Diamond" => Tier::Diamond,
      _ => ENTRY_TIER,
    }
  }

  pub const fn name(self) -> &'static str {
    match self {
      Tier::Star => "Star",
      Tier::Silver => "Silver",
      Tier::Gold => "Gold",
      Tier::Platinum => "Platinum",
      Tier::Diamond => "Diamond",
    }
  }
}

/// Quota for a tier given by name, defaulting to the entry tier's quota.
pub fn quota_for(name: &[u8]) -> u32 {
  Tier::from_name(name).quota()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quotas_follow_the_rule_table() {
    let quotas: [u32; 5] = TIER_ORDER.map(Tier::quota);
    assert_eq!(quotas, [3, 9, 27, 81, 243]);
  }

  #[test]
  fn quotas_increase_along_tier_order() {
    for pair in TIER_ORDER.windows(2) {
      assert!(pair[0] < pair[1]);
      assert!(pair[0].quota() < pair[1].quota());
    }
  }

  #[test]
  fn unknown_tier_name_defaults_to_entry_quota() {
    assert_eq!(quota_for(b"Gold"), 27);
    assert_eq!(quota_for(b"Bronze"), Tier::Star.quota());
    assert_eq!(quota_for(b""), 3);
    assert_eq!(Tier::from_name(b"gold"), Tier::Star);
  }

  #[test]
  fn next_walks_the_tier_order() {
    for pair in TIER_ORDER.windows(2) {
      assert_eq!(pair[0].next(), Some(pair[1]));
    }
    assert_eq!(Tier::Diamond.next(), None);
  }

  #[test]
  fn names_round_trip() {
    for tier in TIER_ORDER {
      assert_eq!(Tier::from_name(tier.name().as_bytes()), tier);
    }
  }

  #[test]
  fn milestones_sit_below_quota() {
    for tier in TIER_ORDER {
      for m in tier.milestones() {
        assert!(m.at_received < tier.quota(), "{tier:?} milestone past quota");
        assert!(m.amount > 0);
      }
    }
    assert!(Tier::Star.milestones().is_empty());
  }

  #[test]
  fn milestone_lookup_matches_exact_count() {
    let upgrade = Tier::Silver.milestone_at(4).unwrap();
    assert_eq!(upgrade.kind, MilestoneKind::Upgrade);
    assert_eq!(upgrade.amount, 1_800);
    assert_eq!(
      Tier::Diamond.milestone_at(242).map(|m| m.kind),
      Some(MilestoneKind::Sponsor)
    );
    assert_eq!(Tier::Gold.milestone_at(12), None);
  }

  #[test]
  fn seed_amount_is_entry_help_amount() {
    assert_eq!(SEED_PAYMENT_AMOUNT, ENTRY_TIER.help_amount());
  }

  #[test]
  fn tier_serializes_by_name_for_chain_specs() {
    let json = serde_json::to_string(&Tier::Platinum).unwrap();
    assert_eq!(json, "\"Platinum\"");
    let tier: Tier = serde_json::from_str("\"Silver\"").unwrap();
    assert_eq!(tier, Tier::Silver);
  }
}
