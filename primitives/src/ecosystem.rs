//! Plan-wide parameters for the helping plan.
//!
//! Runtime configurations pick their pallet constants from here so every deployment agrees on
//! the same SLA, reference rules and queue bounds.

/// Balance type alias used for help amounts across the plan.
pub type Balance = u128;

/// Milliseconds since the Unix epoch.
pub type Moment = u64;

/// Plan parameters shared by runtime configuration and tests.
pub mod params {
  use super::Moment;

  /// One hour in milliseconds.
  pub const HOUR_MILLIS: Moment = 60 * 60 * 1_000;

  /// Time an entry member may wait for a full set of senders before the gap is
  /// considered a leak (48 hours).
  pub const ASSIGNMENT_SLA_MILLIS: Moment = 48 * HOUR_MILLIS;

  /// Minimum length of a normalized payment reference (UTR).
  pub const MIN_PAYMENT_REFERENCE_LEN: u32 = 6;

  /// Upper bound for a payment reference after normalization.
  pub const MAX_PAYMENT_REFERENCE_LEN: u32 = 64;

  /// Upper bound for the payment method label.
  pub const MAX_PAYMENT_METHOD_LEN: u32 = 32;

  /// Upper bound for the proof pointer (e.g. an upload URL).
  pub const MAX_PROOF_POINTER_LEN: u32 = 256;

  /// Upper bound for the reason attached to an operator override.
  pub const MAX_OVERRIDE_REASON_LEN: u32 = 256;

  /// Members one auditor call may process.
  pub const MAX_AUDIT_BATCH: u32 = 32;

  /// Receiver-side queue bound.
  ///
  /// Must cover the largest quota (243) plus headroom for records the auditor has not yet
  /// trimmed and records archived by promotion.
  pub const MAX_RECEIVER_QUEUE: u32 = 512;

  /// Sender-side queue bound.
  pub const MAX_SENDER_QUEUE: u32 = 64;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tiers::{TIER_ORDER, Tier};

  #[test]
  fn sla_is_forty_eight_hours() {
    assert_eq!(params::ASSIGNMENT_SLA_MILLIS, 172_800_000);
  }

  #[test]
  fn receiver_queue_fits_the_largest_quota() {
    let largest = TIER_ORDER.iter().map(|t| t.quota()).max().unwrap_or(0);
    assert_eq!(largest, Tier::Diamond.quota());
    assert!(params::MAX_RECEIVER_QUEUE > largest);
  }

  #[test]
  fn reference_bounds_are_consistent() {
    assert!(params::MIN_PAYMENT_REFERENCE_LEN > 0);
    assert!(params::MIN_PAYMENT_REFERENCE_LEN <= params::MAX_PAYMENT_REFERENCE_LEN);
  }
}
