/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!The RingCT signature orchestrator.
//!
//!This module assembles the work of the commitment, ECDH, rangeproof and
//!ring signature engines into one verifiable transaction signature object,
//!and checks such objects end-to-end.
//!
//!Two modes exist. **Full** mode binds all inputs against all outputs with a
//!single MLSAG whose last row carries the commitment difference. **Simple**
//!mode gives every input its own MLSAG and a public pseudo-output
//!commitment, so inputs verify independently while the pseudo-outputs
//!carry the balance in aggregate.
//!
//!Generation needs secrets and returns `Result`; verification consumes only
//!public data and returns a plain accept/reject, because everything it
//!looks at arrives from the network.

mod generate;
mod verify;

pub use generate::{gen_rct, gen_rct_simple};
pub use verify::{
    RctObserver,
    RctCheck,
    ver_rct,
    ver_rct_simple,
    ver_rct_simple_with_observer,
    ver_rct_semantics_simple,
    ver_rct_non_semantics_simple
};

use serde::{Serialize, Deserialize};

use crate::internal_common::*;
use crate::tlv::TlvCodec;
use crate::rangeproof::{RangeSig, Bulletproof};
use crate::signature::MgSig;

///The non-prunable half of a RingCT signature:
///everything a node must keep to serve the chain.
///
///`mix_ring` is indexed ring-member-first in full mode
///(`mix_ring[k][i]` = ring member `k`, input `i`) and input-first in simple
///mode (`mix_ring[i][k]` = input `i`, ring member `k`).
///
///`pseudo_outs` is populated here for `Simple` signatures;
///Bulletproof-type signatures carry them in the prunable half instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RctSigBase {
    pub rct_type: RctType,
    pub message: Key,
    pub mix_ring: Vec<Vec<PublicCtKey>>,
    pub pseudo_outs: Vec<Commitment>,
    pub ecdh_info: Vec<EcdhTuple>,
    pub out_pk: Vec<PublicCtKey>,
    pub txn_fee: u64,
}

///The prunable half of a RingCT signature: the bulky proof material
///that can be dropped once a transaction is buried deep enough.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RctSigPrunable {
    pub range_sigs: Vec<RangeSig>,
    pub bulletproofs: Vec<Bulletproof>,
    pub mgs: Vec<MgSig>,
    pub pseudo_outs: Vec<Commitment>,
}

///A complete RingCT signature.
///
///Created by `gen_rct`/`gen_rct_simple` and never mutated afterwards;
///the verification entry points only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RctSig {
    pub base: RctSigBase,
    pub p: RctSigPrunable,

} impl RctSig {
    ///The pseudo-output commitments of a simple-mode signature,
    ///wherever this signature type stores them.
    pub fn pseudo_outs(&self) -> &Vec<Commitment> {
        return match self.base.rct_type.is_bulletproof() {
            true => &self.p.pseudo_outs,
            false => &self.base.pseudo_outs
        }
    }

    ///The message the MLSAGs of this signature actually sign:
    ///a hash binding the caller's message, the whole signature base,
    ///and every rangeproof body.
    ///
    ///Fails only if the signature is too large for its own wire encoding.
    pub fn pre_mlsag_hash(&self) -> Result<Key, SerializationError> {
        let mut buf: Vec<u8> = self.base.message.to_vec();
        buf.extend(self.base.to_tlv()?);
        for range_sig in &self.p.range_sigs {
            buf.extend(range_sig.to_tlv()?);
        }
        for bulletproof in &self.p.bulletproofs {
            buf.extend(bulletproof.to_tlv()?);
        }
        return Ok(domain_h_bytes(&buf, domains::RCT_PRE_HASH))
    }
}

///Build the key matrix a full-mode MLSAG ranges over:
///one column per ring member, holding every input's destination key
///plus a final commitment-difference row.
pub(crate) fn full_key_matrix(
    mix_ring: &Vec<Vec<PublicCtKey>>, out_pk: &Vec<PublicCtKey>, txn_fee: u64
) -> Vec<Vec<RistrettoPoint>> {
    //everything all outputs (and the fee) commit to
    let out_sum: RistrettoPoint = out_pk.iter()
        .map(|out| out.mask.0).sum::<RistrettoPoint>() + scalar_mult_h(txn_fee);

    let mut matrix: Vec<Vec<RistrettoPoint>> = Vec::with_capacity(mix_ring.len());
    for column in mix_ring {
        let mut keys: Vec<RistrettoPoint> = Vec::with_capacity(column.len() + 1);
        for input in column {
            keys.push(input.dest);
        }
        //the balance row: this column's input commitments minus all outputs
        let mask_sum: RistrettoPoint = column.iter().map(|input| input.mask.0).sum();
        keys.push(mask_sum - out_sum);
        matrix.push(keys);
    }
    return matrix
}

///Build the 2-row key matrix a simple-mode MLSAG ranges over:
///each ring member's destination key, and its commitment
///re-based against the input's pseudo-output.
pub(crate) fn simple_key_matrix(
    ring: &Vec<PublicCtKey>, pseudo_out: &Commitment
) -> Vec<Vec<RistrettoPoint>> {
    return ring.iter()
        .map(|member| vec!(member.dest, member.mask.0 - pseudo_out.0))
        .collect()
}
