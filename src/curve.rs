/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Elliptic curve functions and constants.
//!
//! Everything the rest of the crate does with scalars and points goes
//! through this adapter; no other module talks to the curve library directly.

use crate::errors::SerializationError;

pub use curve25519_dalek::{
    constants,
    scalar::Scalar,
    ristretto::{
        RistrettoPoint,
        CompressedRistretto,
        RistrettoBasepointTable,
        VartimeRistrettoPrecomputation
    },
    traits::{
        Identity,
        MultiscalarMul,
        VartimeMultiscalarMul,
        VartimePrecomputedMultiscalarMul
    }
};
use rand::{thread_rng, Rng};

///The basepoint of the elliptic curve.
///`G` is a precomputed table of values, not an EC point, in order to speed up operations.
///To access the EC point itself, use `G_POINT`.
pub const G: &RistrettoBasepointTable = &constants::RISTRETTO_BASEPOINT_TABLE;
///The basepoint of the elliptic curve.
///`G_POINT` is the actual EC point, whereas `G` is a precomputed table of values for faster operations.
pub const G_POINT: RistrettoPoint = constants::RISTRETTO_BASEPOINT_POINT;

lazy_static! {
    pub(crate) static ref G_MULTISCALAR_MUL: VartimeRistrettoPrecomputation = VartimeRistrettoPrecomputation::new(vec!(G_POINT));
}

///Encode a point to byte array for hashing purposes.
///
///Though possible, this is not intended to be reversible:
///if you wish to "decode" back to a point,
///then use `decode_point` instead.
///
///You should use `batch_encode_points` when encoding multiple points,
///as that is much more efficient.
///Note that `batch_encode_points` may return different bytes than `encode_point` for the same point due to how batching is done.
pub fn encode_point(point: &RistrettoPoint) -> [u8; 32] {
    return point.compress().to_bytes()
}

///Efficient batch encoding for multiple points to byte arrays for hashing purposes.
///
///Though possible, this is not intended to be reversible:
///if you wish to "decode" back to a point,
///then use `decode_point` instead.
pub fn batch_encode_points(points: &Vec<RistrettoPoint>) -> Vec<[u8; 32]> {
    let mut encoded: Vec<[u8; 32]> = Vec::new();
    for point in RistrettoPoint::double_and_compress_batch(points) {
        encoded.push(point.to_bytes());
    }
    return encoded
}

///Decode a canonical 32-byte encoding back into a point.
///
///Any byte string which is not the canonical encoding of a point on the
///curve is rejected. Nothing downstream ever operates on an unchecked point.
pub fn decode_point(bytes: &[u8]) -> Result<RistrettoPoint, SerializationError> {
    if bytes.len() != 32 {
        return Err(SerializationError::DecodingError)
    }

    return match CompressedRistretto::from_slice(bytes).decompress() {
        Some(point) => Ok(point),
        None => Err(SerializationError::DecodingError)
    };
}

///Decode a canonical 32-byte encoding back into a scalar.
///
///Scalars at or above the group order are rejected rather than reduced,
///so that every scalar has exactly one accepted encoding.
pub fn decode_scalar(bytes: &[u8]) -> Result<Scalar, SerializationError> {
    return match bytes.try_into() {
        Ok(bytes) => {
            match Scalar::from_canonical_bytes(bytes) {
                Some(scalar) => Ok(scalar),
                None => Err(SerializationError::DecodingError)
            }
        },
        Err(_) => Err(SerializationError::DecodingError)
    }
}

///Check whether `bytes` is the canonical encoding of a valid public key.
pub fn check_key(bytes: &[u8]) -> bool {
    return decode_point(bytes).is_ok()
}

///return a random scalar
pub fn random_scalar() -> Scalar {
    let mut scalar_bytes = [0u8; 64];
    thread_rng().fill(&mut scalar_bytes[..]);
    return Scalar::from_bytes_mod_order_wide(&scalar_bytes);
}

///return a random point on the curve
pub fn random_point() -> RistrettoPoint {
    return &random_scalar() * G;
}

///Generate a random keypair `(secret, public)` where `public = secret * G`.
pub fn generate_keypair() -> (Scalar, RistrettoPoint) {
    let secret = random_scalar();
    return (secret, &secret * G)
}

///Multiply a point by the curve cofactor.
///
///Ristretto has no small-order subgroup, so this cannot move a point out of
///the prime-order group; it is kept so that every operation of the protocol
///surface has exactly one place to live.
pub fn mul8(point: &RistrettoPoint) -> RistrettoPoint {
    return Scalar::from(8u8) * point
}
