/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Cryptographic proofs which demonstrate that the amount committed to in a pedersen commitment is non-negative

mod borromean;
mod bulletproof;

pub use borromean::{BoroSig, RangeSig};
pub use bulletproof::Bulletproof;

///Commitment values (in atomic units) are allowed to be between 0 and 2<sup>`BIT_RANGE`</sup> - 1.
//This should not exceed 64, and must be a power of 2 for Bulletproofs.
//Increasing this number will increase the size and verification time of rangeproofs.
pub const BIT_RANGE: usize = 64;

///Maximum commitment value (in atomic units) allowed for a rangeproof: 2<sup>`BIT_RANGE`</sup> - 1
pub const MAX_VALUE: u64 = ((1u128 << BIT_RANGE) - 1) as u64;

///Maximum number of values allowed in an aggregated Bulletproof.
pub const MAX_AGGREGATION_SIZE: usize = 16;
