/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! RingCT signature verification.
//!
//! Everything here is a pure predicate over public data. Malformed or
//! tampered input — wrong lengths, mismatched type tags, proofs that don't
//! close — rejects the signature; nothing an attacker controls can cause
//! more than a `false`.
//!
//! Simple-mode checking is split in two so callers can short-circuit:
//! `ver_rct_semantics_simple` covers structure and the balance equation
//! (cheap), `ver_rct_non_semantics_simple` covers rangeproofs and MLSAGs
//! (expensive). `ver_rct_simple` runs both in that order.

use log::debug;

use crate::internal_common::*;
use super::{RctSig, full_key_matrix, simple_key_matrix};

///Which component of a signature a verification verdict belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RctCheck {
    ///Structural well-formedness and type/payload agreement.
    Semantics,
    ///The commitment balance equation.
    Balance,
    ///The rangeproof covering output `usize` (or all outputs, for
    ///an aggregated Bulletproof, reported as output 0).
    RangeProof(usize),
    ///The MLSAG covering input `usize` (full mode reports input 0).
    RingSignature(usize),
}

///An optional post-verification observer.
///
///Passed as a parameter to the `*_with_observer` entry points and handed
///each component verdict as it is produced. Observers never influence the
///result and are never stored inside signature data.
pub trait RctObserver {
    fn on_check(&self, check: RctCheck, ok: bool);
}

fn observe(observer: Option<&dyn RctObserver>, check: RctCheck, ok: bool) {
    if let Some(observer) = observer {
        observer.on_check(check, ok);
    }
}

///Does the mix ring hold one column per ring member,
///each covering `rows` inputs?
fn full_ring_well_formed(mix_ring: &Vec<Vec<PublicCtKey>>) -> bool {
    if mix_ring.is_empty() || mix_ring[0].is_empty() {
        return false
    }
    let rows = mix_ring[0].len();
    return mix_ring.iter().all(|column| column.len() == rows)
}

///Verify a full-mode RingCT signature.
pub fn ver_rct(rv: &RctSig) -> bool {
    if rv.base.rct_type != RctType::Full {
        debug!("rejecting rct signature: not a full-mode type");
        return false
    }

    //structure first; everything below indexes on these lengths
    let outputs = rv.base.out_pk.len();
    if outputs == 0
        || rv.p.range_sigs.len() != outputs
        || rv.base.ecdh_info.len() != outputs
        || !rv.p.bulletproofs.is_empty()
        || !rv.base.pseudo_outs.is_empty()
        || !rv.p.pseudo_outs.is_empty()
        || rv.p.mgs.len() != 1
        || !full_ring_well_formed(&rv.base.mix_ring) {
        debug!("rejecting rct signature: malformed full-mode structure");
        return false
    }

    //every output amount must be proven in range
    for (range_sig, out) in rv.p.range_sigs.iter().zip(&rv.base.out_pk) {
        if range_sig.verify(out.mask).is_err() {
            debug!("rejecting rct signature: rangeproof does not close");
            return false
        }
    }

    //the single MLSAG carries both the spend authority and the balance
    let message = match rv.pre_mlsag_hash() {
        Ok(message) => message,
        Err(_) => return false
    };
    let rows = rv.base.mix_ring[0].len();
    let matrix = full_key_matrix(&rv.base.mix_ring, &rv.base.out_pk, rv.base.txn_fee);
    if rv.p.mgs[0].verify(&message, &matrix, rows).is_err() {
        debug!("rejecting rct signature: mlsag does not close");
        return false
    }
    return true
}

fn semantics_simple(rv: &RctSig, observer: Option<&dyn RctObserver>) -> bool {
    let ok = semantics_simple_structure(rv);
    observe(observer, RctCheck::Semantics, ok);
    if !ok {
        debug!("rejecting rct signature: malformed simple-mode structure");
        return false
    }

    //sum of pseudo-outputs == sum of output commitments + fee*H
    let out_commitments: Vec<Commitment> = rv.base.out_pk.iter().map(|out| out.mask).collect();
    let balanced = Commitment::is_balanced(
        rv.pseudo_outs().clone(), out_commitments, rv.base.txn_fee);
    observe(observer, RctCheck::Balance, balanced);
    if !balanced {
        debug!("rejecting rct signature: commitments do not balance");
        return false
    }
    return true
}

fn semantics_simple_structure(rv: &RctSig) -> bool {
    if !rv.base.rct_type.is_simple() {
        return false
    }

    let inputs = rv.base.mix_ring.len();
    let outputs = rv.base.out_pk.len();
    if inputs == 0 || outputs == 0
        || rv.base.mix_ring.iter().any(|ring| ring.is_empty())
        || rv.base.ecdh_info.len() != outputs
        || rv.p.mgs.len() != inputs {
        return false
    }

    //the type tag dictates where pseudo-outs live and
    //which rangeproof system must be present
    if rv.base.rct_type.is_bulletproof() {
        if !rv.base.pseudo_outs.is_empty()
            || rv.p.pseudo_outs.len() != inputs
            || !rv.p.range_sigs.is_empty()
            || rv.p.bulletproofs.len() != 1 {
            return false
        }
        //the aggregated proof must be bound to exactly these outputs
        let proof = &rv.p.bulletproofs[0];
        if proof.v.len() != outputs {
            return false
        }
        for (proven, out) in proof.v.iter().zip(&rv.base.out_pk) {
            if proven != &out.mask {
                return false
            }
        }
    } else {
        if !rv.p.pseudo_outs.is_empty()
            || rv.base.pseudo_outs.len() != inputs
            || !rv.p.bulletproofs.is_empty()
            || rv.p.range_sigs.len() != outputs {
            return false
        }
    }
    return true
}

fn non_semantics_simple(rv: &RctSig, observer: Option<&dyn RctObserver>) -> bool {
    //revalidate the lengths this function indexes on, so it is safe
    //to call on its own with arbitrary input
    if !rv.base.rct_type.is_simple() || !semantics_simple_structure(rv) {
        debug!("rejecting rct signature: malformed simple-mode structure");
        return false
    }

    //rangeproofs
    if rv.base.rct_type.is_bulletproof() {
        let ok = rv.p.bulletproofs[0].verify().is_ok();
        observe(observer, RctCheck::RangeProof(0), ok);
        if !ok {
            debug!("rejecting rct signature: bulletproof does not close");
            return false
        }
    } else {
        for (i, (range_sig, out)) in rv.p.range_sigs.iter().zip(&rv.base.out_pk).enumerate() {
            let ok = range_sig.verify(out.mask).is_ok();
            observe(observer, RctCheck::RangeProof(i), ok);
            if !ok {
                debug!("rejecting rct signature: rangeproof {} does not close", i);
                return false
            }
        }
    }

    //one MLSAG per input, each against its own ring and pseudo-out
    let message = match rv.pre_mlsag_hash() {
        Ok(message) => message,
        Err(_) => return false
    };
    let pseudo_outs = rv.pseudo_outs();
    for i in 0..rv.base.mix_ring.len() {
        let matrix = simple_key_matrix(&rv.base.mix_ring[i], &pseudo_outs[i]);
        let ok = rv.p.mgs[i].verify(&message, &matrix, 1).is_ok();
        observe(observer, RctCheck::RingSignature(i), ok);
        if !ok {
            debug!("rejecting rct signature: mlsag {} does not close", i);
            return false
        }
    }
    return true
}

///Verify the cheap half of a simple-mode signature:
///structural well-formedness, type/payload agreement,
///and the commitment balance equation.
pub fn ver_rct_semantics_simple(rv: &RctSig) -> bool {
    return semantics_simple(rv, None)
}

///Verify the expensive half of a simple-mode signature:
///every rangeproof and every per-input MLSAG.
///
///Callers are expected to run `ver_rct_semantics_simple` first and
///short-circuit, but this function revalidates what it depends on and is
///safe to call on arbitrary input.
pub fn ver_rct_non_semantics_simple(rv: &RctSig) -> bool {
    return non_semantics_simple(rv, None)
}

///Verify a simple-mode RingCT signature end-to-end.
pub fn ver_rct_simple(rv: &RctSig) -> bool {
    return semantics_simple(rv, None) && non_semantics_simple(rv, None)
}

///Same as `ver_rct_simple`, reporting each component verdict
///to the given observer as it is produced.
pub fn ver_rct_simple_with_observer(rv: &RctSig, observer: Option<&dyn RctObserver>) -> bool {
    return semantics_simple(rv, observer) && non_semantics_simple(rv, observer)
}
