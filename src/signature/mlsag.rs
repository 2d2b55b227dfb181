/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Multilayered Linkable Spontaneous Anonymous Group (MLSAG) signatures.
//!
//! An MLSAG generalizes the ring signature to a *matrix* of keys:
//! each ring member contributes one column, and every row of that column is
//! a key the signer must simultaneously know the secret of. RingCT uses the
//! rows for the spend key and for commitment-difference keys, so one
//! signature authorizes the spend *and* the balance at once.
//!
//! Key images are produced for the first `ds_rows` rows ("double-spendable"
//! rows); the remaining rows prove knowledge only.

use serde::{Serialize, Deserialize};
use zeroize::Zeroize;

use crate::internal_common::*;
use super::h_key_image_point;

const FILLER_SCALAR: Scalar = constants::BASEPOINT_ORDER;

///Hash one column's transcript into the challenge for the next column.
fn round_hash(message: &[u8], points: &Vec<RistrettoPoint>) -> Scalar {
    return h_scalar(&[message, &batch_encode_points(points).concat()].concat())
}

///An MLSAG signature:
///the response matrix `ss` (one row of scalars per ring member),
///the initial challenge `cc`, and the key images `ii`
///(one per double-spendable row).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MgSig {
    pub ss: Vec<Vec<Scalar>>,
    pub cc: Scalar,
    pub ii: Vec<RistrettoPoint>,

} impl MgSig {
    ///Sign `message` over a key matrix.
    ///
    ///`matrix[k]` is ring member `k`'s key vector; all vectors must have the
    ///same length, which is the number of rows. `secrets` opens every row of
    ///`matrix[index]`, and key images are revealed for the first `ds_rows` rows.
    ///
    ///# Panics
    ///Panics on a violated caller contract: an out-of-bounds signer index,
    ///ragged matrix dimensions, or a secret vector that does not open the
    ///column at `index`.
    pub fn sign(message: &[u8], matrix: &Vec<Vec<RistrettoPoint>>, secrets: &Vec<Scalar>, index: usize, ds_rows: usize) -> Self {
        let n = matrix.len();
        let rows = secrets.len();

        assert!(n > 0, "empty ring");
        assert!(index < n, "signer index outside the ring");
        assert!(rows > 0 && ds_rows <= rows, "bad row layout");
        for column in matrix {
            assert!(column.len() == rows, "ragged key matrix");
        }
        for r in 0..rows {
            assert!(&secrets[r] * G == matrix[index][r],
                "secret key does not open the ring member at the signer index");
        }

        //key images for the double-spendable rows
        let mut ii: Vec<RistrettoPoint> = Vec::with_capacity(ds_rows);
        for r in 0..ds_rows {
            ii.push(secrets[r] * h_key_image_point(&encode_point(&matrix[index][r])));
        }

        let mut alpha: Vec<Scalar> = (0..rows).map(|_| random_scalar()).collect();
        let mut ss: Vec<Vec<Scalar>> = vec!(vec!(FILLER_SCALAR; rows); n);
        let mut c: Vec<Scalar> = vec!(FILLER_SCALAR; n);

        //the real column commits to fresh randomness
        let mut points: Vec<RistrettoPoint> = Vec::with_capacity(2 * rows);
        for r in 0..rows {
            points.push(&alpha[r] * G);
            if r < ds_rows {
                points.push(alpha[r] * h_key_image_point(&encode_point(&matrix[index][r])));
            }
        }
        c[(index + 1) % n] = round_hash(message, &points);

        //travel around the ring, resolving decoy columns with random responses
        let mut i = (index + 1) % n;
        while i != index {
            let mut points: Vec<RistrettoPoint> = Vec::with_capacity(2 * rows);
            for r in 0..rows {
                ss[i][r] = random_scalar();

                //(ss[i][r] * G) + (c[i] * matrix[i][r])
                points.push((&ss[i][r] * G) + (c[i] * matrix[i][r]));
                if r < ds_rows {
                    let image_base = h_key_image_point(&encode_point(&matrix[i][r]));
                    //(ss[i][r] * image_base) + (c[i] * ii[r])
                    points.push(RistrettoPoint::multiscalar_mul(
                        vec!(ss[i][r], c[i]), vec!(image_base, ii[r])
                    ));
                }
            }
            c[(i + 1) % n] = round_hash(message, &points);
            i = (i + 1) % n;
        }

        //"tie" the real column, proving we know its secrets
        for r in 0..rows {
            ss[index][r] = alpha[r] - (c[index] * secrets[r]);
        }
        alpha.zeroize();

        return Self{ss, cc: c[0], ii}
    }

    ///Check this signature against a key matrix and message.
    ///
    ///Replays the challenge chain around every column using only public
    ///points and the stored responses, and accepts iff the chain closes
    ///on the stored initial challenge.
    ///
    ///Returns `Ok()` if the signature is valid,
    ///or `Err(SignatureError)` if it's invalid or malformed.
    pub fn verify(&self, message: &[u8], matrix: &Vec<Vec<RistrettoPoint>>, ds_rows: usize) -> Result<(), SignatureError> {
        let n = matrix.len();
        if n == 0 || self.ss.len() != n {
            return Err(SignatureError::Malformed)
        }
        let rows = matrix[0].len();
        if rows == 0 || ds_rows > rows || self.ii.len() != ds_rows {
            return Err(SignatureError::Malformed)
        }
        for column in matrix {
            if column.len() != rows {
                return Err(SignatureError::Malformed)
            }
        }
        for responses in &self.ss {
            if responses.len() != rows {
                return Err(SignatureError::Malformed)
            }
        }

        //travel around the ring
        let mut c = self.cc;
        for i in 0..n {
            let mut points: Vec<RistrettoPoint> = Vec::with_capacity(2 * rows);
            for r in 0..rows {
                //(ss[i][r] * G) + (c * matrix[i][r])
                points.push(G_MULTISCALAR_MUL.vartime_mixed_multiscalar_mul(
                    vec!(self.ss[i][r]), vec!(c), vec!(matrix[i][r])
                ));
                if r < ds_rows {
                    let image_base = h_key_image_point(&encode_point(&matrix[i][r]));
                    //(ss[i][r] * image_base) + (c * ii[r])
                    points.push(RistrettoPoint::vartime_multiscalar_mul(
                        vec!(self.ss[i][r], c), vec!(image_base, self.ii[r])
                    ));
                }
            }
            c = round_hash(message, &points);
        }

        //check if we end up back where we started
        return match c == self.cc {
            true => Ok(()),
            false => Err(SignatureError::Invalid)
        };
    }
}
