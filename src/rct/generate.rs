/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! RingCT signature generation.
//!
//! Both entry points drive the same pipeline: assemble output commitments
//! and ECDH info, prove every output amount in range, hash the assembled
//! base into the signed message, then authorize the spend with MLSAGs.

use zeroize::Zeroize;

use crate::internal_common::*;
use crate::ecdh::{self, SharedSecret};
use crate::rangeproof::{RangeSig, Bulletproof};
use crate::signature::MgSig;
use super::{RctSig, RctSigBase, RctSigPrunable, full_key_matrix, simple_key_matrix};

///One proven output: its blinding factor, public key pair and ECDH info.
struct OutputMaterial {
    out_sk: Vec<Scalar>,
    out_pk: Vec<PublicCtKey>,
    ecdh_info: Vec<EcdhTuple>,
    range_sigs: Vec<RangeSig>,
    bulletproofs: Vec<Bulletproof>,
}

///Commit to every output amount, prove it in range,
///and mask the opening for the receiver.
fn build_outputs(
    destinations: &Vec<RistrettoPoint>,
    out_amounts: &Vec<u64>,
    amount_keys: &Vec<SharedSecret>,
    config: &RctConfig,
    short_amounts: bool,
) -> Result<OutputMaterial, RctError> {
    let mut out_sk: Vec<Scalar> = Vec::with_capacity(out_amounts.len());
    let mut out_pk: Vec<PublicCtKey> = Vec::with_capacity(out_amounts.len());
    let mut ecdh_info: Vec<EcdhTuple> = Vec::with_capacity(out_amounts.len());
    let mut range_sigs: Vec<RangeSig> = Vec::new();
    let mut bulletproofs: Vec<Bulletproof> = Vec::new();

    if config.range_proof_type.is_bulletproof() {
        //one aggregated proof covers every output
        let blindings: Vec<Scalar> = amount_keys.iter().map(|key| match short_amounts {
            //8-byte ECDH amounts don't transmit the mask; it is derived
            true => key.commitment_mask(),
            false => random_scalar()
        }).collect();

        let (commitments, proof) = Bulletproof::prove(out_amounts.clone(), blindings.clone())?;
        for i in 0..out_amounts.len() {
            out_pk.push(PublicCtKey::new(destinations[i], commitments[i]));
        }
        bulletproofs.push(proof);
        out_sk = blindings;
    } else {
        for i in 0..out_amounts.len() {
            let blinding = random_scalar();
            let (commitment, proof) = RangeSig::prove(out_amounts[i], blinding)?;
            out_pk.push(PublicCtKey::new(destinations[i], commitment));
            range_sigs.push(proof);
            out_sk.push(blinding);
        }
    }

    for i in 0..out_amounts.len() {
        ecdh_info.push(ecdh::encode(
            &EcdhTuple::new(out_sk[i], out_amounts[i]),
            &amount_keys[i],
            short_amounts
        ));
    }

    return Ok(OutputMaterial{out_sk, out_pk, ecdh_info, range_sigs, bulletproofs})
}

///Generate a full-mode RingCT signature.
///
///`mix_ring[k][i]` is ring member `k`'s key pair for input `i`; `index` is
///the ring position actually being spent, shared by all inputs. The inputs'
///amounts are never passed in: the single MLSAG's balance row only closes
///if the input commitments equal the outputs plus the fee, and an
///unbalanced call is rejected before signing.
///
///Full mode uses Borromean rangeproofs; a Bulletproof configuration is a
///configuration mismatch and is rejected as malformed.
///
///Returns the signature and the output blinding factors.
pub fn gen_rct(
    message: Key,
    in_sk: &Vec<PrivateCtKey>,
    destinations: &Vec<RistrettoPoint>,
    out_amounts: &Vec<u64>,
    amount_keys: &Vec<SharedSecret>,
    mix_ring: &Vec<Vec<PublicCtKey>>,
    index: usize,
    txn_fee: u64,
    config: RctConfig,
) -> Result<(RctSig, Vec<Scalar>), RctError> {
    if destinations.is_empty()
        || destinations.len() != out_amounts.len()
        || destinations.len() != amount_keys.len() {
        return Err(RctError::Malformed)
    }
    if in_sk.is_empty() || mix_ring.is_empty() || index >= mix_ring.len() {
        return Err(RctError::Malformed)
    }
    for column in mix_ring {
        if column.len() != in_sk.len() {
            return Err(RctError::Malformed)
        }
    }
    if config.range_proof_type.is_bulletproof() {
        return Err(RctError::Malformed)
    }

    let outputs = build_outputs(destinations, out_amounts, amount_keys, &config, false)?;

    let partial = RctSig {
        base: RctSigBase {
            rct_type: RctType::Full,
            message,
            mix_ring: mix_ring.clone(),
            pseudo_outs: Vec::new(),
            ecdh_info: outputs.ecdh_info,
            out_pk: outputs.out_pk,
            txn_fee,
        },
        p: RctSigPrunable {
            range_sigs: outputs.range_sigs,
            bulletproofs: outputs.bulletproofs,
            mgs: Vec::new(),
            pseudo_outs: Vec::new(),
        },
    };
    let signed_message = partial.pre_mlsag_hash()?;

    //one MLSAG over every input row plus the balance row
    let rows = in_sk.len();
    let matrix = full_key_matrix(mix_ring, &partial.base.out_pk, txn_fee);

    let mut secrets: Vec<Scalar> = in_sk.iter().map(|sk| sk.dest).collect();
    let mut balance_secret = Scalar::zero();
    for sk in in_sk {
        balance_secret += sk.mask;
    }
    for out_blinding in &outputs.out_sk {
        balance_secret -= out_blinding;
    }
    secrets.push(balance_secret);

    //an unbalanced call cannot open the balance row; reject it
    //here instead of tripping the signing contract
    if &balance_secret * G != matrix[index][rows] {
        secrets.zeroize();
        return Err(RctError::Unbalanced)
    }

    let mg = MgSig::sign(&signed_message, &matrix, &secrets, index, rows);
    secrets.zeroize();

    let mut rct_sig = partial;
    rct_sig.p.mgs = vec!(mg);
    return Ok((rct_sig, outputs.out_sk))
}

///Generate a simple-mode RingCT signature.
///
///`mix_ring[i]` is input `i`'s own ring and `indices[i]` the position being
///spent within it. Every input gets a pseudo-output commitment and its own
///MLSAG, so rings of different inputs are fully independent.
///
///The signature type follows the configuration: Borromean rangeproofs give
///`Simple`, Bulletproofs give `Bulletproof` or (for `bp_version >= 2`,
///with 8-byte ECDH amounts) `Bulletproof2`.
///
///Returns the signature and the output blinding factors.
pub fn gen_rct_simple(
    message: Key,
    in_sk: &Vec<PrivateCtKey>,
    in_amounts: &Vec<u64>,
    destinations: &Vec<RistrettoPoint>,
    out_amounts: &Vec<u64>,
    amount_keys: &Vec<SharedSecret>,
    mix_ring: &Vec<Vec<PublicCtKey>>,
    indices: &Vec<usize>,
    txn_fee: u64,
    config: RctConfig,
) -> Result<(RctSig, Vec<Scalar>), RctError> {
    if in_sk.is_empty()
        || in_sk.len() != in_amounts.len()
        || in_sk.len() != mix_ring.len()
        || in_sk.len() != indices.len() {
        return Err(RctError::Malformed)
    }
    if destinations.is_empty()
        || destinations.len() != out_amounts.len()
        || destinations.len() != amount_keys.len() {
        return Err(RctError::Malformed)
    }
    for (ring, index) in mix_ring.iter().zip(indices) {
        if ring.is_empty() || *index >= ring.len() {
            return Err(RctError::Malformed)
        }
    }

    //the committed amounts must balance before anything is signed
    let in_total: u128 = in_amounts.iter().map(|amount| u128::from(*amount)).sum();
    let out_total: u128 = out_amounts.iter().map(|amount| u128::from(*amount)).sum();
    if in_total != out_total + u128::from(txn_fee) {
        return Err(RctError::Unbalanced)
    }

    let rct_type = config.simple_type();
    let outputs = build_outputs(
        destinations, out_amounts, amount_keys, &config, rct_type.has_short_amounts())?;

    //pseudo-output blindings: chosen so they add up to the output
    //blindings, which makes the commitments balance exactly
    let m = in_sk.len();
    let mut out_blinding_total = Scalar::zero();
    for out_blinding in &outputs.out_sk {
        out_blinding_total += out_blinding;
    }

    let mut pseudo_blindings: Vec<Scalar> = Vec::with_capacity(m);
    let mut pseudo_total = Scalar::zero();
    for _ in 0..m - 1 {
        let blinding = random_scalar();
        pseudo_total += blinding;
        pseudo_blindings.push(blinding);
    }
    pseudo_blindings.push(out_blinding_total - pseudo_total);

    let pseudo_outs: Vec<Commitment> = pseudo_blindings.iter().zip(in_amounts)
        .map(|(blinding, amount)| Commitment::commit(*amount, *blinding))
        .collect();

    //Simple signatures carry pseudo-outs in the base,
    //Bulletproof-type signatures in the prunable half
    let (base_pseudo, prunable_pseudo) = match rct_type.is_bulletproof() {
        true => (Vec::new(), pseudo_outs.clone()),
        false => (pseudo_outs.clone(), Vec::new())
    };

    let partial = RctSig {
        base: RctSigBase {
            rct_type,
            message,
            mix_ring: mix_ring.clone(),
            pseudo_outs: base_pseudo,
            ecdh_info: outputs.ecdh_info,
            out_pk: outputs.out_pk,
            txn_fee,
        },
        p: RctSigPrunable {
            range_sigs: outputs.range_sigs,
            bulletproofs: outputs.bulletproofs,
            mgs: Vec::new(),
            pseudo_outs: prunable_pseudo,
        },
    };
    let signed_message = partial.pre_mlsag_hash()?;

    //one 2-row MLSAG per input
    let mut mgs: Vec<MgSig> = Vec::with_capacity(m);
    for i in 0..m {
        let matrix = simple_key_matrix(&mix_ring[i], &pseudo_outs[i]);
        let mut secrets = vec!(in_sk[i].dest, in_sk[i].mask - pseudo_blindings[i]);
        mgs.push(MgSig::sign(&signed_message, &matrix, &secrets, indices[i], 1));
        secrets.zeroize();
    }
    pseudo_blindings.zeroize();

    let mut rct_sig = partial;
    rct_sig.p.mgs = mgs;
    return Ok((rct_sig, outputs.out_sk))
}
