/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Bulletproof rangeproofs.
//!
//! A single logarithmic-size proof that one or more committed amounts lie
//! in `[0, 2^BIT_RANGE)`. Aggregated proofs cover a batch of commitments
//! padded to a power of two. The proof transcript is made non-interactive
//! with the Fiat-Shamir transform: challenges `y`, `z`, `x`, `x_ip` and one
//! `w` per folding round are all derived by hashing the transcript so far.
//!
//! The folding loop runs exactly `log2(BIT_RANGE * aggregation)` rounds.
//! That count is a protocol constant: a proof carrying any other number of
//! `L`/`R` pairs is rejected structurally, before any curve arithmetic.

use std::iter::zip;

use serde::{Serialize, Deserialize};
use zeroize::Zeroize;

use crate::internal_common::*;
use super::{BIT_RANGE, MAX_AGGREGATION_SIZE};

const MAX_MN: usize = BIT_RANGE * MAX_AGGREGATION_SIZE;

lazy_static! {
    static ref BP_GENERATORS: (Vec<RistrettoPoint>, Vec<RistrettoPoint>) = bp_generators();
}

///Derive the two `MAX_MN`-long generator vectors.
///Nothing-up-my-sleeve: each generator is a hash-to-point of `H` and an index.
fn bp_generators() -> (Vec<RistrettoPoint>, Vec<RistrettoPoint>) {
    let base = encode_point(&PEDERSEN_H_POINT);

    let mut gi: Vec<RistrettoPoint> = Vec::with_capacity(MAX_MN);
    let mut hi: Vec<RistrettoPoint> = Vec::with_capacity(MAX_MN);
    for i in 0..MAX_MN {
        gi.push(domain_h_point(
            &[&base, (2 * i as u64).to_le_bytes().as_slice()].concat(),
            domains::BULLETPROOF_GENERATOR));
        hi.push(domain_h_point(
            &[&base, (2 * i as u64 + 1).to_le_bytes().as_slice()].concat(),
            domains::BULLETPROOF_GENERATOR));
    }
    return (gi, hi)
}

///Absorb `data` into the running transcript and squeeze out a challenge.
fn transcript_hash(cache: &mut Scalar, data: &[u8], domain: &[u8]) -> Scalar {
    let challenge = domain_h_scalar(
        &[cache.to_bytes().as_slice(), data].concat(), domain);
    *cache = challenge;
    return challenge
}

///`[1, x, x^2, ... x^(n-1)]`
fn vector_powers(x: Scalar, n: usize) -> Vec<Scalar> {
    let mut powers: Vec<Scalar> = Vec::with_capacity(n);
    let mut current = Scalar::one();
    for _ in 0..n {
        powers.push(current);
        current *= x;
    }
    return powers
}

///`<a, b>`
fn inner_product(a: &[Scalar], b: &[Scalar]) -> Scalar {
    let mut sum = Scalar::zero();
    for (x, y) in zip(a, b) {
        sum += x * y;
    }
    return sum
}


///A Bulletproof rangeproof, bound to the batch of commitments in `v`.
///
///These proofs scale logarithmically with the number of aggregated values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bulletproof {
    pub v: Vec<Commitment>,
    pub a: RistrettoPoint,
    pub s: RistrettoPoint,
    pub t1: RistrettoPoint,
    pub t2: RistrettoPoint,
    pub taux: Scalar,
    pub mu: Scalar,
    pub l: Vec<RistrettoPoint>,
    pub r: Vec<RistrettoPoint>,
    pub aa: Scalar,
    pub bb: Scalar,
    pub tt: Scalar,

} impl Bulletproof {
    ///Create a Bulletproof, given values and blinding factors.
    ///
    ///The batch is padded internally to a power of two;
    ///only the real commitments appear in the returned proof.
    ///
    ///Return the commitments and the proof if proving was successful,
    ///or `RangeProofError` if an error occurred.
    pub fn prove(values: Vec<u64>, blindings: Vec<Scalar>) -> Result<(Vec<Commitment>, Self), RangeProofError> {
        if values.is_empty() || values.len() != blindings.len() {
            return Err(RangeProofError::Malformed)
        }
        if values.len() > MAX_AGGREGATION_SIZE {
            return Err(RangeProofError::TooLargeAggregationSize)
        }
        for value in &values {
            if u128::from(*value) > (1u128 << BIT_RANGE) - 1 {
                return Err(RangeProofError::OutOfRange)
            }
        }

        let m = values.len().next_power_of_two();
        let mn = m * BIT_RANGE;
        let (gi, hi) = &*BP_GENERATORS;

        //padding entries commit to 0 with a blinding factor of 0
        let mut padded_values = values.clone();
        let mut padded_blindings = blindings.clone();
        padded_values.resize(m, 0);
        padded_blindings.resize(m, Scalar::zero());

        let mut commitments: Vec<Commitment> = Vec::with_capacity(values.len());
        for (value, blinding) in zip(&values, &blindings) {
            commitments.push(Commitment::commit(*value, *blinding));
        }

        //bit decomposition of every (padded) value
        let mut al: Vec<Scalar> = Vec::with_capacity(mn);
        let mut ar: Vec<Scalar> = Vec::with_capacity(mn);
        for value in &padded_values {
            for i in 0..BIT_RANGE {
                let bit = Scalar::from((value >> i) & 1);
                al.push(bit);
                ar.push(bit - Scalar::one());
            }
        }

        //A commits to the bit vectors, S to the per-bit randomness
        let alpha = random_scalar();
        let a_point = RistrettoPoint::multiscalar_mul(
            [vec!(alpha), al.clone(), ar.clone()].concat(),
            [vec!(G_POINT), gi[..mn].to_vec(), hi[..mn].to_vec()].concat()
        );

        let sl: Vec<Scalar> = (0..mn).map(|_| random_scalar()).collect();
        let sr: Vec<Scalar> = (0..mn).map(|_| random_scalar()).collect();
        let rho = random_scalar();
        let s_point = RistrettoPoint::multiscalar_mul(
            [vec!(rho), sl.clone(), sr.clone()].concat(),
            [vec!(G_POINT), gi[..mn].to_vec(), hi[..mn].to_vec()].concat()
        );

        //challenges y and z
        let mut cache = h_scalar_points(&Commitment::to_ristretto(commitments.clone()));
        let y = transcript_hash(&mut cache,
            &[encode_point(&a_point), encode_point(&s_point)].concat(), domains::BULLETPROOF_Y);
        let z = transcript_hash(&mut cache, &[], domains::BULLETPROOF_Z);
        if y == Scalar::zero() || z == Scalar::zero() {
            return Err(RangeProofError::Unspecified("degenerate transcript challenge".to_string()))
        }

        let y_powers = vector_powers(y, mn);
        let z_powers = vector_powers(z, m + 3);
        let two_powers = vector_powers(Scalar::from(2u8), BIT_RANGE);

        //l(X) = (aL - z) + sL X
        //r(X) = y^n o (aR + z + sR X) + zt,  zt[j*N+i] = z^(2+j) * 2^i
        let mut l0: Vec<Scalar> = Vec::with_capacity(mn);
        let mut r0: Vec<Scalar> = Vec::with_capacity(mn);
        let mut r1: Vec<Scalar> = Vec::with_capacity(mn);
        for i in 0..mn {
            let zt = z_powers[2 + (i / BIT_RANGE)] * two_powers[i % BIT_RANGE];
            l0.push(al[i] - z);
            r0.push((y_powers[i] * (ar[i] + z)) + zt);
            r1.push(y_powers[i] * sr[i]);
        }
        let l1 = sl;

        //t(X) = <l(X), r(X)> = t0 + t1 X + t2 X^2
        let t1_coeff = inner_product(&l0, &r1) + inner_product(&l1, &r0);
        let t2_coeff = inner_product(&l1, &r1);

        let tau1 = random_scalar();
        let tau2 = random_scalar();
        let t1_point = (&tau1 * &*PEDERSEN_G) + (&t1_coeff * &*PEDERSEN_H);
        let t2_point = (&tau2 * &*PEDERSEN_G) + (&t2_coeff * &*PEDERSEN_H);

        //challenge x
        let x = transcript_hash(&mut cache,
            &[encode_point(&t1_point), encode_point(&t2_point)].concat(), domains::BULLETPROOF_X);
        if x == Scalar::zero() {
            return Err(RangeProofError::Unspecified("degenerate transcript challenge".to_string()))
        }

        let mut taux = (tau1 * x) + (tau2 * x * x);
        for (j, blinding) in padded_blindings.iter().enumerate() {
            taux += z_powers[2 + j] * blinding;
        }
        let mu = alpha + (rho * x);

        //evaluate l and r at x
        let mut l_vec: Vec<Scalar> = Vec::with_capacity(mn);
        let mut r_vec: Vec<Scalar> = Vec::with_capacity(mn);
        for i in 0..mn {
            l_vec.push(l0[i] + (x * l1[i]));
            r_vec.push(r0[i] + (x * r1[i]));
        }
        let tt = inner_product(&l_vec, &r_vec);

        //challenge binding the inner product to t
        let x_ip = transcript_hash(&mut cache,
            &[taux.to_bytes(), mu.to_bytes(), tt.to_bytes()].concat(), domains::BULLETPROOF_X_IP);
        if x_ip == Scalar::zero() {
            return Err(RangeProofError::Unspecified("degenerate transcript challenge".to_string()))
        }

        //inner product argument: fold l and r down to single scalars
        let y_inv = y.invert();
        let y_inv_powers = vector_powers(y_inv, mn);

        let mut g_prime = gi[..mn].to_vec();
        let mut h_prime: Vec<RistrettoPoint> = Vec::with_capacity(mn);
        for i in 0..mn {
            h_prime.push(y_inv_powers[i] * hi[i]);
        }
        let mut a_prime = l_vec;
        let mut b_prime = r_vec;

        let mut l_points: Vec<RistrettoPoint> = Vec::new();
        let mut r_points: Vec<RistrettoPoint> = Vec::new();

        let mut n_prime = mn;
        while n_prime > 1 {
            n_prime /= 2;

            let cl = inner_product(&a_prime[..n_prime], &b_prime[n_prime..]);
            let cr = inner_product(&a_prime[n_prime..], &b_prime[..n_prime]);

            //L = <a_lo, g_hi> + <b_hi, h_lo> + (cl * x_ip) * H
            let l_point = RistrettoPoint::multiscalar_mul(
                [a_prime[..n_prime].to_vec(), b_prime[n_prime..].to_vec(), vec!(cl * x_ip)].concat(),
                [g_prime[n_prime..].to_vec(), h_prime[..n_prime].to_vec(), vec!(*PEDERSEN_H_POINT)].concat()
            );
            //R = <a_hi, g_lo> + <b_lo, h_hi> + (cr * x_ip) * H
            let r_point = RistrettoPoint::multiscalar_mul(
                [a_prime[n_prime..].to_vec(), b_prime[..n_prime].to_vec(), vec!(cr * x_ip)].concat(),
                [g_prime[..n_prime].to_vec(), h_prime[n_prime..].to_vec(), vec!(*PEDERSEN_H_POINT)].concat()
            );

            let w = transcript_hash(&mut cache,
                &[encode_point(&l_point), encode_point(&r_point)].concat(), domains::BULLETPROOF_ROUND);
            if w == Scalar::zero() {
                return Err(RangeProofError::Unspecified("degenerate transcript challenge".to_string()))
            }
            let w_inv = w.invert();

            for i in 0..n_prime {
                g_prime[i] = RistrettoPoint::multiscalar_mul(
                    vec!(w_inv, w), vec!(g_prime[i], g_prime[n_prime + i]));
                h_prime[i] = RistrettoPoint::multiscalar_mul(
                    vec!(w, w_inv), vec!(h_prime[i], h_prime[n_prime + i]));
                a_prime[i] = (w * a_prime[i]) + (w_inv * a_prime[n_prime + i]);
                b_prime[i] = (w_inv * b_prime[i]) + (w * b_prime[n_prime + i]);
            }
            g_prime.truncate(n_prime);
            h_prime.truncate(n_prime);
            a_prime.truncate(n_prime);
            b_prime.truncate(n_prime);

            l_points.push(l_point);
            r_points.push(r_point);
        }

        let proof = Self {
            v: commitments.clone(),
            a: a_point,
            s: s_point,
            t1: t1_point,
            t2: t2_point,
            taux,
            mu,
            l: l_points,
            r: r_points,
            aa: a_prime[0],
            bb: b_prime[0],
            tt,
        };

        al.zeroize();
        ar.zeroize();

        return Ok((commitments, proof))
    }

    ///Verify this Bulletproof against the commitments it carries.
    ///
    ///Returns `Ok()` if the proof is valid,
    ///or `Err(RangeProofError)` if it's invalid.
    pub fn verify(&self) -> Result<(), RangeProofError> {
        //structural validation runs before any curve arithmetic
        if self.v.is_empty() {
            return Err(RangeProofError::Malformed)
        }
        if self.v.len() > MAX_AGGREGATION_SIZE {
            return Err(RangeProofError::TooLargeAggregationSize)
        }
        let m = self.v.len().next_power_of_two();
        let mn = m * BIT_RANGE;
        let rounds = mn.trailing_zeros() as usize;
        if self.l.len() != rounds || self.r.len() != rounds {
            return Err(RangeProofError::Malformed)
        }

        let (gi, hi) = &*BP_GENERATORS;

        //replay the transcript
        let mut cache = h_scalar_points(&Commitment::to_ristretto(self.v.clone()));
        let y = transcript_hash(&mut cache,
            &[encode_point(&self.a), encode_point(&self.s)].concat(), domains::BULLETPROOF_Y);
        let z = transcript_hash(&mut cache, &[], domains::BULLETPROOF_Z);
        let x = transcript_hash(&mut cache,
            &[encode_point(&self.t1), encode_point(&self.t2)].concat(), domains::BULLETPROOF_X);
        let x_ip = transcript_hash(&mut cache,
            &[self.taux.to_bytes(), self.mu.to_bytes(), self.tt.to_bytes()].concat(), domains::BULLETPROOF_X_IP);
        if y == Scalar::zero() || z == Scalar::zero() || x == Scalar::zero() || x_ip == Scalar::zero() {
            return Err(RangeProofError::Invalid)
        }

        let y_powers = vector_powers(y, mn);
        let z_powers = vector_powers(z, m + 3);
        let two_powers = vector_powers(Scalar::from(2u8), BIT_RANGE);

        //first check: the t commitment line
        //taux*G + t*H == sum(z^(2+j) * Vj) + delta*H + x*T1 + x^2*T2
        let sum_y: Scalar = y_powers.iter().sum();
        let sum_two: Scalar = two_powers.iter().sum();
        let mut delta = (z - (z * z)) * sum_y;
        for j in 0..m {
            delta -= z_powers[3 + j] * sum_two;
        }

        let left = (&self.taux * &*PEDERSEN_G) + (&self.tt * &*PEDERSEN_H);
        let mut right_scalars: Vec<Scalar> = vec!(delta, x, x * x);
        let mut right_points: Vec<RistrettoPoint> = vec!(*PEDERSEN_H_POINT, self.t1, self.t2);
        for (j, commitment) in self.v.iter().enumerate() {
            right_scalars.push(z_powers[2 + j]);
            right_points.push(commitment.0);
        }
        let right = RistrettoPoint::vartime_multiscalar_mul(right_scalars, right_points);
        if left != right {
            return Err(RangeProofError::Invalid)
        }

        //second check: the folded inner product argument
        let y_inv = y.invert();
        let y_inv_powers = vector_powers(y_inv, mn);

        //P = A + x*S - z*sum(Gi) + sum(hcoeff_i * h'_i), h'_i = y^-i * Hi
        let mut p_scalars: Vec<Scalar> = vec!(Scalar::one(), x);
        let mut p_points: Vec<RistrettoPoint> = vec!(self.a, self.s);
        for i in 0..mn {
            let zt = z_powers[2 + (i / BIT_RANGE)] * two_powers[i % BIT_RANGE];
            p_scalars.push(-z);
            p_points.push(gi[i]);
            //z * y^i * y^-i == z
            p_scalars.push(z + (zt * y_inv_powers[i]));
            p_points.push(hi[i]);
        }
        let p = RistrettoPoint::vartime_multiscalar_mul(p_scalars, p_points);

        //the commitment the folding rounds start from
        let mut q = p - (&self.mu * &*PEDERSEN_G) + ((self.tt * x_ip) * *PEDERSEN_H_POINT);

        let mut g_prime = gi[..mn].to_vec();
        let mut h_prime: Vec<RistrettoPoint> = Vec::with_capacity(mn);
        for i in 0..mn {
            h_prime.push(y_inv_powers[i] * hi[i]);
        }

        let mut n_prime = mn;
        for round in 0..rounds {
            n_prime /= 2;

            let w = transcript_hash(&mut cache,
                &[encode_point(&self.l[round]), encode_point(&self.r[round])].concat(), domains::BULLETPROOF_ROUND);
            if w == Scalar::zero() {
                return Err(RangeProofError::Invalid)
            }
            let w_inv = w.invert();

            for i in 0..n_prime {
                g_prime[i] = RistrettoPoint::vartime_multiscalar_mul(
                    vec!(w_inv, w), vec!(g_prime[i], g_prime[n_prime + i]));
                h_prime[i] = RistrettoPoint::vartime_multiscalar_mul(
                    vec!(w, w_inv), vec!(h_prime[i], h_prime[n_prime + i]));
            }
            g_prime.truncate(n_prime);
            h_prime.truncate(n_prime);

            q = RistrettoPoint::vartime_multiscalar_mul(
                vec!(w * w, Scalar::one(), w_inv * w_inv),
                vec!(self.l[round], q, self.r[round])
            );
        }

        //after folding, the commitment must open to (aa, bb, aa*bb)
        let expected = RistrettoPoint::vartime_multiscalar_mul(
            vec!(self.aa, self.bb, self.aa * self.bb * x_ip),
            vec!(g_prime[0], h_prime[0], *PEDERSEN_H_POINT)
        );
        return match q == expected {
            true => Ok(()),
            false => Err(RangeProofError::Invalid)
        };
    }

    ///Verify several Bulletproofs.
    ///
    ///Returns `Ok()` only if every proof in the batch is valid.
    pub fn verify_batch(proofs: &Vec<Bulletproof>) -> Result<(), RangeProofError> {
        for proof in proofs {
            proof.verify()?;
        }
        return Ok(())
    }
}
