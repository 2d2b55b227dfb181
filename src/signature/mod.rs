/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//!Ring signatures: the classic linkable kind over bare public keys,
//!and the multilayered (MLSAG) kind used by RingCT.
//!
//!Both prove membership of a signing key in a ring of candidate keys
//!without revealing which member signed, and both reveal a key image
//!which is stable per key, so spending the same key twice is detectable.
//!
//!The ring order supplied by the caller is part of the signed data.
//!Reordering the same keys produces a different (still valid) signature,
//!and a verifier must use the order the signer used, never re-sort.

mod ring;
mod mlsag;

pub use ring::RingSignature;
pub use mlsag::MgSig;

use crate::internal_common::*;

///hash to point, specific for key images
pub(crate) fn h_key_image_point(encoded_pub: &[u8; 32]) -> RistrettoPoint {
    return domain_h_point(encoded_pub, domains::SIGNATURE_KEY_IMAGE);
}

///Given a private key, return its key image.
///
///The image is `x * Hp(x * G)`: deterministic per key, and unlinkable to
///the key itself without solving the discrete log.
pub fn key_image(private_key: Scalar) -> RistrettoPoint {
    let public_key = &private_key * G;
    return private_key * h_key_image_point(&encode_point(&public_key))
}
