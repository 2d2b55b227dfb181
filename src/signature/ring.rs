/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Classic linkable ring signatures over bare public keys.

use serde::{Serialize, Deserialize};
use zeroize::Zeroize;

use crate::internal_common::*;
use super::h_key_image_point;

const FILLER_SCALAR: Scalar = constants::BASEPOINT_ORDER;

///Hash the transcript of one signature into the ring challenge.
fn challenge_hash(prefix_hash: &[u8], key_image: &RistrettoPoint, points: &Vec<RistrettoPoint>) -> Scalar {
    let encoded = batch_encode_points(points).concat();
    return domain_h_scalar(
        &[prefix_hash, &encode_point(key_image), &encoded].concat(),
        domains::RING_CHALLENGE)
}

///A linkable ring signature over a ring of public keys.
///
///Proves that the signer knows the private key of one ring member,
///without revealing which one, and binds the key's image so that
///two signatures by the same key can be linked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingSignature {
    pub key_image: RistrettoPoint,
    c: Vec<Scalar>,
    r: Vec<Scalar>,

} impl RingSignature {
    ///Sign `prefix_hash` with the private key of `ring[index]`.
    ///
    ///The ring is used in the order given; that order is part of what is signed.
    ///
    ///# Panics
    ///Panics if `index` is outside the ring or `secret` does not open
    ///`ring[index]` — both are caller bugs, not runtime conditions.
    pub fn sign(prefix_hash: &[u8], ring: &Vec<RistrettoPoint>, secret: Scalar, index: usize) -> Self {
        assert!(index < ring.len(), "signer index outside the ring");
        assert!(&secret * G == ring[index], "secret key does not open the ring member at the signer index");

        let n = ring.len();
        let key_image = secret * h_key_image_point(&encode_point(&ring[index]));

        let mut c: Vec<Scalar> = vec!(FILLER_SCALAR; n);
        let mut r: Vec<Scalar> = vec!(FILLER_SCALAR; n);
        let mut k: Scalar = FILLER_SCALAR;
        let mut others_sum = Scalar::zero();

        let mut points: Vec<RistrettoPoint> = Vec::with_capacity(2 * n);
        for i in 0..n {
            let image_base = h_key_image_point(&encode_point(&ring[i]));
            if i == index {
                k = random_scalar();
                points.push(&k * G);
                points.push(k * image_base);
            } else {
                c[i] = random_scalar();
                r[i] = random_scalar();
                others_sum += c[i];

                points.push((&r[i] * G) + (c[i] * ring[i]));
                //(r[i] * image_base) + (c[i] * key_image)
                points.push(RistrettoPoint::multiscalar_mul(
                    vec!(r[i], c[i]), vec!(image_base, key_image)
                ));
            }
        }

        //close the ring at the real index
        let challenge = challenge_hash(prefix_hash, &key_image, &points);
        c[index] = challenge - others_sum;
        r[index] = k - (c[index] * secret);

        k.zeroize();

        return Self{key_image, c, r}
    }

    ///Check this signature against a ring and message.
    ///
    ///The ring must be in the **exact** order it was signed in.
    ///
    ///Returns `Ok()` if the signature is valid,
    ///or `Err(SignatureError)` if it's invalid or malformed.
    pub fn verify(&self, prefix_hash: &[u8], ring: &Vec<RistrettoPoint>) -> Result<(), SignatureError> {
        let n = ring.len();
        if n == 0 || self.c.len() != n || self.r.len() != n {
            return Err(SignatureError::Malformed)
        }

        let mut sum = Scalar::zero();
        let mut points: Vec<RistrettoPoint> = Vec::with_capacity(2 * n);
        for i in 0..n {
            let image_base = h_key_image_point(&encode_point(&ring[i]));

            //(r[i] * G) + (c[i] * ring[i])
            points.push(G_MULTISCALAR_MUL.vartime_mixed_multiscalar_mul(
                vec!(self.r[i]), vec!(self.c[i]), vec!(ring[i])
            ));
            //(r[i] * image_base) + (c[i] * key_image)
            points.push(RistrettoPoint::vartime_multiscalar_mul(
                vec!(self.r[i], self.c[i]), vec!(image_base, self.key_image)
            ));
            sum += self.c[i];
        }

        //the per-member challenges must add up to the transcript hash
        return match challenge_hash(prefix_hash, &self.key_image, &points) == sum {
            true => Ok(()),
            false => Err(SignatureError::Invalid)
        };
    }
}
