/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Borromean ring signature-based rangeproofs.
//!
//! The committed amount is decomposed into `BIT_RANGE` bits. Each bit gets
//! its own commitment `Ci` and a two-member ring: either `Ci` is a
//! commitment to 0, or `Ci - 2^i * H` is. The rings share one Borromean
//! closure scalar `ee`, and the bit-commitments must add back up to the
//! commitment being proven.

use serde::{Serialize, Deserialize};
use zeroize::Zeroize;

use crate::internal_common::*;
use super::BIT_RANGE;

lazy_static! {
    static ref POWER_H_TABLE: Vec<RistrettoPoint> = power_h_table();
}

const FILLER_SCALAR: Scalar = constants::BASEPOINT_ORDER;

///`H * 2^i` for each bit position
fn power_h_table() -> Vec<RistrettoPoint> {
    let mut table: Vec<RistrettoPoint> = Vec::with_capacity(BIT_RANGE);
    let mut power = *PEDERSEN_H_POINT;
    for _ in 0..BIT_RANGE {
        table.push(power);
        power = power + power;
    }
    return table
}

///A Borromean ring signature over `BIT_RANGE` two-member rings:
///one response per ring member (`s0` for the "commitment to 0" case,
///`s1` for the "commitment to 2^i" case) and the shared closure `ee`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoroSig {
    pub s0: Vec<Scalar>,
    pub s1: Vec<Scalar>,
    pub ee: Scalar,
}

///create a borromean ring signature over the given two-member rings
fn borromean_sign(secrets: &Vec<Scalar>, p1: &Vec<RistrettoPoint>, p2: &Vec<RistrettoPoint>, indices: &Vec<usize>) -> BoroSig {
    let mut s0: Vec<Scalar> = vec!(FILLER_SCALAR; BIT_RANGE);
    let mut s1: Vec<Scalar> = vec!(FILLER_SCALAR; BIT_RANGE);
    let mut alpha: Vec<Scalar> = Vec::with_capacity(BIT_RANGE);

    //walk each ring up to its last member, starting from the known index
    let mut last_legs: Vec<RistrettoPoint> = Vec::with_capacity(BIT_RANGE);
    for i in 0..BIT_RANGE {
        alpha.push(random_scalar());
        let commitment = &alpha[i] * &*PEDERSEN_G;

        if indices[i] == 0 {
            s1[i] = random_scalar();
            let chash = h_scalar(&encode_point(&commitment));
            //(s1 * G) + (chash * p2)
            last_legs.push((&s1[i] * &*PEDERSEN_G) + (chash * p2[i]));
        } else {
            last_legs.push(commitment);
        }
    }

    //the shared seed which ties all rings together
    let ee = h_scalar(&batch_encode_points(&last_legs).concat());

    //close each ring back at the known index
    for i in 0..BIT_RANGE {
        if indices[i] == 0 {
            s0[i] = alpha[i] - (secrets[i] * ee);
        } else {
            s0[i] = random_scalar();
            let leg = (&s0[i] * &*PEDERSEN_G) + (ee * p1[i]);
            let chash = h_scalar(&encode_point(&leg));
            s1[i] = alpha[i] - (secrets[i] * chash);
        }
    }

    alpha.zeroize();

    return BoroSig{s0, s1, ee}
}

///verify a borromean ring signature over the given two-member rings
fn borromean_verify(sig: &BoroSig, p1: &Vec<RistrettoPoint>, p2: &Vec<RistrettoPoint>) -> Result<(), RangeProofError> {
    let mut last_legs: Vec<RistrettoPoint> = Vec::with_capacity(BIT_RANGE);
    for i in 0..BIT_RANGE {
        //(s0 * G) + (ee * p1)
        let first_leg = PEDERSEN_G_MULTISCALAR_MUL.vartime_mixed_multiscalar_mul(
            vec!(sig.s0[i]), vec!(sig.ee), vec!(p1[i])
        );
        let chash = h_scalar(&encode_point(&first_leg));
        //(s1 * G) + (chash * p2)
        last_legs.push(PEDERSEN_G_MULTISCALAR_MUL.vartime_mixed_multiscalar_mul(
            vec!(sig.s1[i]), vec!(chash), vec!(p2[i])
        ));
    }

    //check if we end up back where we started
    return match h_scalar(&batch_encode_points(&last_legs).concat()) == sig.ee {
        true => Ok(()),
        false => Err(RangeProofError::Invalid)
    };
}


///Rangeproof based on borromean ring signatures.
///
///These proofs are essentially obsolete;
///Bulletproofs are smaller, faster, and scale better than these proofs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeSig {
    pub asig: BoroSig,
    pub ci: Vec<Commitment>, //per-bit commitments

} impl RangeSig {
    ///Create a Borromean rangeproof, given a value and blinding factor.
    ///
    ///Return a commitment and a Borromean rangeproof if proving was successful,
    ///or `RangeProofError` if an error occurred.
    pub fn prove(value: u64, blinding: Scalar) -> Result<(Commitment, Self), RangeProofError> {
        let mut blindings: Vec<Scalar> = Vec::with_capacity(BIT_RANGE);
        let mut blinding_sum = Scalar::zero();

        let mut c: Vec<RistrettoPoint> = Vec::with_capacity(BIT_RANGE);
        let mut p1: Vec<RistrettoPoint> = Vec::with_capacity(BIT_RANGE);
        let mut p2: Vec<RistrettoPoint> = Vec::with_capacity(BIT_RANGE);
        let mut indices: Vec<usize> = Vec::with_capacity(BIT_RANGE);

        for i in 0..BIT_RANGE {
            let bit = ((value >> i) & 1) as usize;

            //the per-bit blinding factors must add back up to `blinding`
            let r_i = match i == BIT_RANGE - 1 {
                false => random_scalar(),
                true => blinding - blinding_sum
            };
            blinding_sum += r_i;
            blindings.push(r_i);

            //Ci commits to either 0 or 2^i
            let c_i = match bit {
                0 => &r_i * &*PEDERSEN_G,
                _ => (&r_i * &*PEDERSEN_G) + POWER_H_TABLE[i]
            };
            c.push(c_i);
            p1.push(c_i);
            p2.push(c_i - POWER_H_TABLE[i]);
            indices.push(bit);
        }

        let asig = borromean_sign(&blindings, &p1, &p2, &indices);
        blindings.zeroize();

        let total: RistrettoPoint = c.iter().sum();
        return Ok((Commitment(total), Self{
            asig,
            ci: Commitment::from_ristretto(c)
        }))
    }

    ///Verify a Borromean rangeproof against the commitment it claims to prove.
    ///
    ///Returns `Ok()` if the proof is valid,
    ///or `Err(RangeProofError)` if it's invalid.
    pub fn verify(&self, commitment: Commitment) -> Result<(), RangeProofError> {
        if self.ci.len() != BIT_RANGE
            || self.asig.s0.len() != BIT_RANGE
            || self.asig.s1.len() != BIT_RANGE {
            return Err(RangeProofError::Malformed)
        }

        //check if the bit-commitments equal the total commitment
        let c = Commitment::to_ristretto(self.ci.clone());
        if commitment.0 != c.iter().sum() {
            return Err(RangeProofError::Invalid)
        }

        let mut p2: Vec<RistrettoPoint> = Vec::with_capacity(BIT_RANGE);
        for i in 0..BIT_RANGE {
            p2.push(c[i] - POWER_H_TABLE[i]);
        }

        return borromean_verify(&self.asig, &c, &p2)
    }
}
