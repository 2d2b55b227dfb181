/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use blake2::{
    Blake2b,
    Digest,
    digest::consts::{U32, U64}
};
use crate::curve::*;

type Blake2b256 = Blake2b<U32>;
type Blake2b512 = Blake2b<U64>;

///Hash bytes to bytes, domain separated.
///You most likely won't need this, see `h_bytes` instead.
pub fn domain_h_bytes(msg: &[u8], domain: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::default();
    hasher.update([msg, domain].concat());
    return hasher.finalize().as_slice().try_into()
        .expect("Wrong digest length");
}

///Hash bytes to elliptic curve point, domain separated.
///You most likely won't need this, see `h_point` instead.
pub fn domain_h_point(msg: &[u8], domain: &[u8]) -> RistrettoPoint {
    let mut hasher = Blake2b512::default();
    hasher.update([msg, domain].concat());
    return RistrettoPoint::from_uniform_bytes(
        hasher.finalize().as_slice().try_into()
        .expect("Wrong digest length")
    );
}

///Hash bytes to scalar, domain separated.
///You most likely won't need this, see `h_scalar` instead.
pub fn domain_h_scalar(msg: &[u8], domain: &[u8]) -> Scalar {
    return Scalar::from_bytes_mod_order(
        domain_h_bytes(msg, domain));
}

///Hash bytes to bytes.
pub fn h_bytes(msg: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::default();
    hasher.update(msg);
    return hasher.finalize().as_slice().try_into()
        .expect("Wrong digest length");
}

///Hash bytes to elliptic curve point.
pub fn h_point(msg: &[u8]) -> RistrettoPoint {
    let mut hasher = Blake2b512::default();
    hasher.update(msg);
    return RistrettoPoint::from_uniform_bytes(
        hasher.finalize().as_slice().try_into()
        .expect("Wrong digest length")
    );
}

///Hash bytes to scalar.
pub fn h_scalar(msg: &[u8]) -> Scalar {
    return Scalar::from_bytes_mod_order(h_bytes(msg));
}

///Hash a vector of points to a scalar.
///
///The points are individually encoded and concatenated,
///so the result is bound to the order of the vector.
pub fn h_scalar_points(points: &Vec<RistrettoPoint>) -> Scalar {
    return h_scalar(&batch_encode_points(points).concat())
}

pub mod domains {
    //! Pre-defined hash domains

    pub const SIGNATURE_KEY_IMAGE: &[u8] =      "key_img".as_bytes();
    pub const RING_CHALLENGE: &[u8] =           "ring_sig".as_bytes();

    pub const ECDH_MASK: &[u8] =                "ecdh_mask".as_bytes();
    pub const ECDH_AMOUNT: &[u8] =              "ecdh_amt".as_bytes();
    pub const ECDH_SHORT_AMOUNT: &[u8] =        "ecdh_amt8".as_bytes();
    pub const ECDH_COMMITMENT_MASK: &[u8] =     "ecdh_cmask".as_bytes();

    pub const BULLETPROOF_GENERATOR: &[u8] =    "bp_gen".as_bytes();
    pub const BULLETPROOF_Y: &[u8] =            "bp_y".as_bytes();
    pub const BULLETPROOF_Z: &[u8] =            "bp_z".as_bytes();
    pub const BULLETPROOF_X: &[u8] =            "bp_x".as_bytes();
    pub const BULLETPROOF_X_IP: &[u8] =         "bp_xip".as_bytes();
    pub const BULLETPROOF_ROUND: &[u8] =        "bp_w".as_bytes();

    pub const RCT_PRE_HASH: &[u8] =             "rct_msg".as_bytes();
}
