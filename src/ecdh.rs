/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! [Elliptic Curve Diffie Hellman (ECDH)](https://en.wikipedia.org/wiki/Elliptic-curve_Diffie%E2%80%93Hellman) amount encoding.
//!
//! Every output of a confidential transaction carries an `EcdhTuple`:
//! the commitment's blinding factor and the committed amount, masked
//! relative to a secret shared between sender and receiver. Anyone can
//! *syntactically* decode a tuple with any secret; only a decode under the
//! correct secret yields values consistent with the output's commitment,
//! and that consistency is checked by the caller, not here.

use serde::{Serialize, Deserialize};
use zeroize::Zeroize;

use crate::internal_common::*;


///Shared secret between two keys, `A` and `B`.
///This can be calculated by having the private key of `A` and the public key of `B`,
///or the private key of `B` and the public key of `A`.
///Without the private key to at least one of these keys,
///it is impossible to determine the shared secret between `A` and `B`.
///
///**This should not be publically shared.**
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Zeroize)]
pub struct SharedSecret(
    [u8; 32]

); impl SharedSecret {
    ///Import a raw point as a shared secret.
    pub fn from_point(point: &RistrettoPoint) -> Self {
        return Self(encode_point(point))
    }

    ///Given a user's one-time private key (`my_private`),
    ///and another user's public key (`other_public`),
    ///create a unique one-time shared secret that only those 2 users know.
    pub fn exchange(my_private: Scalar, other_public: &RistrettoPoint) -> Self {
        return Self::from_point(&(my_private * other_public))
    }

    ///Convert this shared secret to a scalar.
    pub fn as_scalar(&self) -> Scalar {
        return Scalar::from_bytes_mod_order(self.0)
    }

    ///The sub-key which masks the blinding factor in the 32-byte encoding.
    fn mask_key(&self) -> Scalar {
        return domain_h_scalar(&self.0, domains::ECDH_MASK)
    }

    ///The sub-key which masks the amount in the 32-byte encoding.
    fn amount_key(&self) -> Scalar {
        return domain_h_scalar(&self.0, domains::ECDH_AMOUNT)
    }

    ///The keystream which masks the amount in the 8-byte encoding.
    fn short_amount_key(&self) -> u64 {
        return u64::from_le_bytes(
            domain_h_bytes(&self.0, domains::ECDH_SHORT_AMOUNT)[0..8]
            .try_into().expect("Wrong keystream length"))
    }

    ///Deterministically derive a commitment blinding factor from this secret.
    ///
    ///The 8-byte amount encoding doesn't transmit the blinding factor at all:
    ///sender and receiver independently derive it with this function.
    pub fn commitment_mask(&self) -> Scalar {
        return domain_h_scalar(&self.0, domains::ECDH_COMMITMENT_MASK)
    }

} impl Drop for SharedSecret {
    fn drop(&mut self) {
        self.zeroize()
    }
}


///Mask an `EcdhTuple` with a shared secret.
///
///With `short_amount`, only 8 bytes of amount keystream are used and the
///mask field is not transmitted (it is re-derived from the shared secret
///on the receiving side); otherwise both fields are masked by field
///addition of independent sub-keys.
pub fn encode(tuple: &EcdhTuple, shared_secret: &SharedSecret, short_amount: bool) -> EcdhTuple {
    if short_amount {
        return EcdhTuple {
            mask: Scalar::zero(),
            amount: xor_amount(&tuple.amount, shared_secret)
        }
    }
    return EcdhTuple {
        mask: tuple.mask + shared_secret.mask_key(),
        amount: tuple.amount + shared_secret.amount_key()
    }
}

///Unmask an `EcdhTuple` with a shared secret. The exact inverse of `encode`.
///
///Decoding with the wrong secret succeeds and yields garbage;
///callers detect that by re-deriving the commitment from the
///recovered values and comparing.
pub fn decode(tuple: &EcdhTuple, shared_secret: &SharedSecret, short_amount: bool) -> EcdhTuple {
    if short_amount {
        return EcdhTuple {
            mask: shared_secret.commitment_mask(),
            amount: xor_amount(&tuple.amount, shared_secret)
        }
    }
    return EcdhTuple {
        mask: tuple.mask - shared_secret.mask_key(),
        amount: tuple.amount - shared_secret.amount_key()
    }
}

///XOR the low 8 bytes of an amount scalar with the short-form keystream.
///Involutive, so it serves both directions.
fn xor_amount(amount: &Scalar, shared_secret: &SharedSecret) -> Scalar {
    let masked = scalar_as_amount(amount) ^ shared_secret.short_amount_key();

    let mut bytes = [0u8; 32];
    bytes[0..8].copy_from_slice(&masked.to_le_bytes());
    return Scalar::from_bytes_mod_order(bytes)
}

///Read the low 8 bytes of a scalar as a little-endian amount.
pub fn scalar_as_amount(scalar: &Scalar) -> u64 {
    return u64::from_le_bytes(scalar.to_bytes()[0..8]
        .try_into().expect("Wrong amount length"))
}
