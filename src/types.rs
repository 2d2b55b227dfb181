/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::iter::Sum;

use serde::{Serialize, Deserialize};
use zeroize::Zeroize;

use crate::curve::*;
use crate::pedersen::*;
use crate::signature::key_image;

///A 32-byte key as it travels over the wire.
///Scalars, points, hashes and encrypted amounts all share this shape.
pub type Key = [u8; 32];

///A pedersen commitment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commitment(
    pub RistrettoPoint

); impl Commitment {
    ///create a commitment to `value` with blinding factor `blinding`
    pub fn commit(value: u64, blinding: Scalar) -> Self {
        //(r * G) + (v * H)
        return Self(
            (&blinding * &*PEDERSEN_G) + (&Scalar::from(value) * &*PEDERSEN_H)
        )
    }

    ///Commitment to `value` with a blinding factor of zero: `value * H`.
    ///
    ///This is what public amounts (the transaction fee) contribute to the
    ///balance equation.
    pub fn zero_commit(value: u64) -> Self {
        return Self(scalar_mult_h(value))
    }

    ///Return the elliptic curve point which represents this commitment.
    ///To convert an elliptic curve point back into a commitment, use `Commitment(point)`.
    pub fn to_point(&self) -> RistrettoPoint {
        return self.0;
    }

    ///Given input commitments, output commitments, and "extra" output (ie fees),
    ///check if the equation is balanced.
    ///
    ///`in == (out + extra)`
    ///
    ///This is plain point arithmetic, not a proof:
    ///without rangeproofs on every output a negative amount
    ///could satisfy the equation.
    pub fn is_balanced(in_commitments: Vec<Commitment>, out_commitments: Vec<Commitment>, extra: u64) -> bool {
        let out = [ out_commitments, vec!(Commitment::zero_commit(extra)) ].concat();
        return Commitment::sum(in_commitments.into_iter()) == Commitment::sum(out.into_iter())
    }

    ///given a `Vec` of commitments, convert them into `RistrettoPoint`'s
    pub(crate) fn to_ristretto(commitments: Vec<Commitment>) -> Vec<RistrettoPoint> {
        return commitments.into_iter().map(|com| com.0).collect();
    }

    ///given a `Vec` of `RistrettoPoint`'s, convert them into commitments
    pub(crate) fn from_ristretto(commitments: Vec<RistrettoPoint>) -> Vec<Commitment> {
        return commitments.into_iter().map(|com| Commitment(com)).collect();
    }

} impl Sum for Commitment {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        return Commitment(RistrettoPoint::sum(
            iter.map(|com| com.to_point()).collect::<Vec<RistrettoPoint>>().iter()))
    }
}

///The private half of a CT key pair:
/// * `dest`: the private key of the public key which can spend the output
/// * `mask`: the blinding factor of the output's commitment
///
///The committed amount is tracked separately by whoever owns these keys.
///
///This is deliberately a different type than `PublicCtKey`,
///even though both are a pair of 32-byte values on the wire:
///the type system, not caller discipline, keeps secrets out of
///positions that expect public data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Zeroize)]
pub struct PrivateCtKey {
    pub dest: Scalar,
    pub mask: Scalar

} impl PrivateCtKey {
    ///Create a private CT key from a spend secret and a blinding factor
    pub fn new(dest: Scalar, mask: Scalar) -> Self {
        return Self{dest, mask}
    }

    ///Turn this (private) key pair into its (public) counterpart,
    ///given the amount hidden in the commitment.
    pub fn to_public(&self, amount: u64) -> PublicCtKey {
        return PublicCtKey::new(
            &self.dest * G,
            Commitment::commit(amount, self.mask),
        )
    }

    ///Return the key image of the spend key
    pub fn key_image(&self) -> RistrettoPoint {
        return key_image(self.dest)
    }

} impl Drop for PrivateCtKey{
    fn drop(&mut self) {
        //clear the keys from memory to improve security
        self.zeroize()
    }
}

///The public half of a CT key pair:
/// * `dest`: the one-time public key which owns the output
/// * `mask`: the pedersen commitment `C` to the output's amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicCtKey {
    pub dest: RistrettoPoint,
    pub mask: Commitment

} impl PublicCtKey {
    ///Given a destination key and a commitment, return a public CT key
    pub fn new(dest: RistrettoPoint, mask: Commitment) -> Self {
        return Self{dest, mask}
    }
}

///The blinding factor and amount of one output,
///masked relative to an ECDH shared secret so that
///only the intended receiver can recover them.
///
///See `ecdh::encode` and `ecdh::decode`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EcdhTuple {
    pub mask: Scalar,
    pub amount: Scalar

} impl EcdhTuple {
    ///Pack a blinding factor and a plain amount into an (unmasked) tuple.
    pub fn new(mask: Scalar, amount: u64) -> Self {
        return Self{
            mask, amount: Scalar::from(amount)
        }
    }
}

///The signature type tag carried in a `RctSigBase`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[repr(u8)]
pub enum RctType {
    Null = 0,
    ///One MLSAG binding all inputs against all outputs, Borromean rangeproofs.
    Full = 1,
    ///One MLSAG and one pseudo-output commitment per input, Borromean rangeproofs.
    Simple = 2,
    ///Simple mode with an aggregated Bulletproof and 32-byte ECDH amounts.
    Bulletproof = 3,
    ///Simple mode with an aggregated Bulletproof and 8-byte ECDH amounts.
    Bulletproof2 = 4,

} impl RctType {
    pub fn as_u8(&self) -> u8 {
        return *self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        return match value {
            0 => Some(Self::Null),
            1 => Some(Self::Full),
            2 => Some(Self::Simple),
            3 => Some(Self::Bulletproof),
            4 => Some(Self::Bulletproof2),
            _ => None
        }
    }

    ///Does this type carry Bulletproofs (rather than Borromean rangeproofs)?
    pub fn is_bulletproof(&self) -> bool {
        return matches!(self, Self::Bulletproof | Self::Bulletproof2)
    }

    ///Is this a per-input ("simple") signature?
    pub fn is_simple(&self) -> bool {
        return matches!(self, Self::Simple | Self::Bulletproof | Self::Bulletproof2)
    }

    ///Are the ECDH amounts of this type encoded in the 8-byte short form?
    pub fn has_short_amounts(&self) -> bool {
        return matches!(self, Self::Bulletproof2)
    }
}

///Which rangeproof system a signature should be built with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[repr(u8)]
pub enum RangeProofType {
    Borromean = 0,
    Bulletproof = 1,
    MultiOutputBulletproof = 2,
    PaddedBulletproof = 3,

} impl RangeProofType {
    pub fn as_u8(&self) -> u8 {
        return *self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        return match value {
            0 => Some(Self::Borromean),
            1 => Some(Self::Bulletproof),
            2 => Some(Self::MultiOutputBulletproof),
            3 => Some(Self::PaddedBulletproof),
            _ => None
        }
    }

    ///Does this setting select Bulletproofs (of any aggregation shape)?
    pub fn is_bulletproof(&self) -> bool {
        return !matches!(self, Self::Borromean)
    }
}

///Caller-supplied proof configuration:
///which rangeproof system to use, and which Bulletproof revision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RctConfig {
    pub range_proof_type: RangeProofType,
    pub bp_version: u32

} impl RctConfig {
    ///The signature type a simple-mode signature built
    ///under this configuration will be tagged with.
    pub fn simple_type(&self) -> RctType {
        if !self.range_proof_type.is_bulletproof() {
            return RctType::Simple
        }
        return match self.bp_version {
            0 | 1 => RctType::Bulletproof,
            _ => RctType::Bulletproof2
        }
    }

    ///Check that a signature's type tag is the one this
    ///configuration would have produced.
    pub fn matches(&self, rct_type: RctType) -> bool {
        return match rct_type {
            RctType::Full => !self.range_proof_type.is_bulletproof(),
            RctType::Simple | RctType::Bulletproof | RctType::Bulletproof2
                => self.simple_type() == rct_type,
            RctType::Null => false
        }
    }
}
