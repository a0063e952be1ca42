#![cfg_attr(not(feature = "std"), no_std)]

pub mod ecosystem;
pub mod tiers;

pub use ecosystem::*;
pub use tiers::*;
