/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The tag-length-value wire codec.
//!
//! Every structure that crosses the process boundary has one canonical
//! byte encoding:
//!
//! ```text
//! |--2 bytes--|--2 bytes--|------ length bytes ------|
//! |    tag    |  length   |  raw data / nested TLV   |
//! ```
//!
//! Tags and lengths are little-endian. Struct fields are encoded as a
//! sequence of tagged fields in ascending tag order. Sequences of
//! fixed-size elements (32-byte keys, CT key pairs) are packed
//! back-to-back with no headers; sequences of variable-size elements
//! (matrices, proofs) carry one header per element, tagged with the
//! element's index. The 16-bit length field caps any one field at
//! 65535 bytes.
//!
//! Encoding the same value always produces the same bytes: field order is
//! fixed, and decoding rejects out-of-order fields, unknown tags, trailing
//! bytes, lengths that overrun the buffer, non-canonical scalars, and
//! off-curve points. `decode(encode(x)) == x` for every codec type.

use crate::errors::SerializationError;
use crate::curve::*;
use crate::types::*;
use crate::rangeproof::{BoroSig, RangeSig, Bulletproof, BIT_RANGE};
use crate::signature::MgSig;
use crate::rct::{RctSig, RctSigBase, RctSigPrunable};

const TAG_SIZE: usize = 2;
const LEN_SIZE: usize = 2;
const HEAD_SIZE: usize = TAG_SIZE + LEN_SIZE;
const MAX_FIELD_LEN: usize = u16::MAX as usize;

///Convert a value to (`to_tlv`/`tlv_encode`) and from (`tlv_decode`)
///its canonical tag-length-value byte encoding.
pub trait TlvCodec: Sized {
    ///The exact number of bytes `tlv_encode` will produce.
    fn tlv_size(&self) -> usize;

    ///Encode into the front of `buf`, returning the number of bytes written.
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError>;

    ///Decode a value from `data`, which must contain exactly one encoding.
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError>;

    ///Encode into a freshly allocated buffer.
    fn to_tlv(&self) -> Result<Vec<u8>, SerializationError> {
        let mut buf = vec![0u8; self.tlv_size()];
        let written = self.tlv_encode(&mut buf)?;
        if written != buf.len() {
            return Err(SerializationError::EncodingError)
        }
        return Ok(buf)
    }
}

fn write_header(tag: u16, len: usize, buf: &mut [u8]) -> Result<(), SerializationError> {
    if len > MAX_FIELD_LEN || buf.len() < HEAD_SIZE {
        return Err(SerializationError::EncodingError)
    }
    buf[0..TAG_SIZE].copy_from_slice(&tag.to_le_bytes());
    buf[TAG_SIZE..HEAD_SIZE].copy_from_slice(&(len as u16).to_le_bytes());
    return Ok(())
}

///Read one header and validate its length against the remaining buffer.
fn read_header(data: &[u8]) -> Result<(u16, usize), SerializationError> {
    if data.len() < HEAD_SIZE {
        return Err(SerializationError::DecodingError)
    }
    let tag = u16::from_le_bytes(data[0..TAG_SIZE].try_into().unwrap());
    let len = u16::from_le_bytes(data[TAG_SIZE..HEAD_SIZE].try_into().unwrap()) as usize;
    if HEAD_SIZE + len > data.len() {
        return Err(SerializationError::DecodingError)
    }
    return Ok((tag, len))
}

///Append one tagged field to `buf` at `offset`.
fn encode_field<T: TlvCodec>(field: &T, tag: u16, buf: &mut [u8], offset: usize) -> Result<usize, SerializationError> {
    let size = field.tlv_size();
    if offset + HEAD_SIZE + size > buf.len() {
        return Err(SerializationError::EncodingError)
    }
    write_header(tag, size, &mut buf[offset..])?;
    let written = field.tlv_encode(&mut buf[offset + HEAD_SIZE..offset + HEAD_SIZE + size])?;
    if written != size {
        return Err(SerializationError::EncodingError)
    }
    return Ok(offset + HEAD_SIZE + size)
}

///Reads the tagged fields of one struct, in canonical (ascending tag) order.
struct FieldReader<'a> {
    data: &'a [u8],
    offset: usize,

} impl<'a> FieldReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        return Self{data, offset: 0}
    }

    ///Read the next field, which must carry exactly the expected tag.
    fn next(&mut self, expected_tag: u16) -> Result<&'a [u8], SerializationError> {
        let (tag, len) = read_header(&self.data[self.offset..])?;
        if tag != expected_tag {
            return Err(SerializationError::DecodingError)
        }
        let start = self.offset + HEAD_SIZE;
        self.offset = start + len;
        return Ok(&self.data[start..start + len])
    }

    ///Assert that every byte of the buffer was consumed.
    fn finish(self) -> Result<(), SerializationError> {
        return match self.offset == self.data.len() {
            true => Ok(()),
            false => Err(SerializationError::DecodingError)
        };
    }
}

//sequences of fixed-size elements are packed with no per-element headers

fn packed_size<T: TlvCodec>(items: &Vec<T>) -> usize {
    return items.iter().map(|item| item.tlv_size()).sum()
}

fn encode_packed<T: TlvCodec>(items: &Vec<T>, buf: &mut [u8]) -> Result<usize, SerializationError> {
    let mut offset = 0;
    for item in items {
        let size = item.tlv_size();
        if offset + size > buf.len() {
            return Err(SerializationError::EncodingError)
        }
        item.tlv_encode(&mut buf[offset..offset + size])?;
        offset += size;
    }
    return Ok(offset)
}

fn decode_packed<T: TlvCodec>(data: &[u8], element_size: usize) -> Result<Vec<T>, SerializationError> {
    if data.len() % element_size != 0 {
        return Err(SerializationError::DecodingError)
    }
    let mut items: Vec<T> = Vec::with_capacity(data.len() / element_size);
    for chunk in data.chunks(element_size) {
        items.push(T::tlv_decode(chunk)?);
    }
    return Ok(items)
}

//sequences of variable-size elements carry one header per element,
//tagged with the element index

fn headered_size<T: TlvCodec>(items: &Vec<T>) -> usize {
    return items.iter().map(|item| item.tlv_size() + HEAD_SIZE).sum()
}

fn encode_headered<T: TlvCodec>(items: &Vec<T>, buf: &mut [u8]) -> Result<usize, SerializationError> {
    let mut offset = 0;
    for (i, item) in items.iter().enumerate() {
        offset = encode_field(item, i as u16, buf, offset)?;
    }
    return Ok(offset)
}

fn decode_headered<T: TlvCodec>(data: &[u8]) -> Result<Vec<T>, SerializationError> {
    let mut items: Vec<T> = Vec::new();
    let mut reader = FieldReader::new(data);
    let mut index: u16 = 0;
    while reader.offset < data.len() {
        items.push(T::tlv_decode(reader.next(index)?)?);
        index = index.checked_add(1).ok_or(SerializationError::DecodingError)?;
    }
    reader.finish()?;
    return Ok(items)
}


//primitive encodings

impl TlvCodec for Scalar {
    fn tlv_size(&self) -> usize {
        return 32
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        if buf.len() < 32 {
            return Err(SerializationError::EncodingError)
        }
        buf[0..32].copy_from_slice(&self.to_bytes());
        return Ok(32)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        return decode_scalar(data)
    }
}

impl TlvCodec for RistrettoPoint {
    fn tlv_size(&self) -> usize {
        return 32
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        if buf.len() < 32 {
            return Err(SerializationError::EncodingError)
        }
        buf[0..32].copy_from_slice(&encode_point(self));
        return Ok(32)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        return decode_point(data)
    }
}

impl TlvCodec for Commitment {
    fn tlv_size(&self) -> usize {
        return 32
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        return self.0.tlv_encode(buf)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        return Ok(Self(RistrettoPoint::tlv_decode(data)?))
    }
}

impl TlvCodec for Key {
    fn tlv_size(&self) -> usize {
        return 32
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        if buf.len() < 32 {
            return Err(SerializationError::EncodingError)
        }
        buf[0..32].copy_from_slice(self);
        return Ok(32)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        return data.try_into().map_err(|_| SerializationError::DecodingError)
    }
}

impl TlvCodec for u64 {
    fn tlv_size(&self) -> usize {
        return 8
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        if buf.len() < 8 {
            return Err(SerializationError::EncodingError)
        }
        buf[0..8].copy_from_slice(&self.to_be_bytes());
        return Ok(8)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        return match data.try_into() {
            Ok(bytes) => Ok(u64::from_be_bytes(bytes)),
            Err(_) => Err(SerializationError::DecodingError)
        }
    }
}

impl TlvCodec for u32 {
    fn tlv_size(&self) -> usize {
        return 4
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        if buf.len() < 4 {
            return Err(SerializationError::EncodingError)
        }
        buf[0..4].copy_from_slice(&self.to_be_bytes());
        return Ok(4)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        return match data.try_into() {
            Ok(bytes) => Ok(u32::from_be_bytes(bytes)),
            Err(_) => Err(SerializationError::DecodingError)
        }
    }
}

impl TlvCodec for RctType {
    fn tlv_size(&self) -> usize {
        return 1
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        if buf.is_empty() {
            return Err(SerializationError::EncodingError)
        }
        buf[0] = self.as_u8();
        return Ok(1)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        if data.len() != 1 {
            return Err(SerializationError::DecodingError)
        }
        return Self::from_u8(data[0]).ok_or(SerializationError::DecodingError)
    }
}

impl TlvCodec for RangeProofType {
    fn tlv_size(&self) -> usize {
        return 1
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        if buf.is_empty() {
            return Err(SerializationError::EncodingError)
        }
        buf[0] = self.as_u8();
        return Ok(1)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        if data.len() != 1 {
            return Err(SerializationError::DecodingError)
        }
        return Self::from_u8(data[0]).ok_or(SerializationError::DecodingError)
    }
}


//sequence encodings

macro_rules! packed_vec_codec {
    ($element:ty, $element_size:expr) => {
        impl TlvCodec for Vec<$element> {
            fn tlv_size(&self) -> usize {
                return packed_size(self)
            }
            fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
                return encode_packed(self, buf)
            }
            fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
                return decode_packed(data, $element_size)
            }
        }
    };
}

macro_rules! headered_vec_codec {
    ($element:ty) => {
        impl TlvCodec for Vec<$element> {
            fn tlv_size(&self) -> usize {
                return headered_size(self)
            }
            fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
                return encode_headered(self, buf)
            }
            fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
                return decode_headered(data)
            }
        }
    };
}

//32-byte elements, packed
packed_vec_codec!(Scalar, 32);
packed_vec_codec!(RistrettoPoint, 32);
packed_vec_codec!(Commitment, 32);
//fixed-size pairs, packed
packed_vec_codec!(PublicCtKey, CTKEY_TLV_SIZE);
packed_vec_codec!(EcdhTuple, ECDH_TLV_SIZE);
//nested/variable-size elements, one header each
headered_vec_codec!(Vec<Scalar>);
headered_vec_codec!(Vec<PublicCtKey>);
headered_vec_codec!(RangeSig);
headered_vec_codec!(Bulletproof);
headered_vec_codec!(MgSig);


//structure encodings

///Both fields of a CT key pair are 32 bytes, so the encoding has one size.
const CTKEY_TLV_SIZE: usize = 2 * (HEAD_SIZE + 32);
///Mask and amount are both carried as 32-byte scalars.
const ECDH_TLV_SIZE: usize = 2 * (HEAD_SIZE + 32);

impl TlvCodec for PublicCtKey {
    fn tlv_size(&self) -> usize {
        return CTKEY_TLV_SIZE
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.dest, 0x0001, buf, 0)?;
        offset = encode_field(&self.mask, 0x0002, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let dest = RistrettoPoint::tlv_decode(reader.next(0x0001)?)?;
        let mask = Commitment::tlv_decode(reader.next(0x0002)?)?;
        reader.finish()?;
        return Ok(Self{dest, mask})
    }
}

impl TlvCodec for EcdhTuple {
    fn tlv_size(&self) -> usize {
        return ECDH_TLV_SIZE
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.mask, 0x0001, buf, 0)?;
        offset = encode_field(&self.amount, 0x0002, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let mask = Scalar::tlv_decode(reader.next(0x0001)?)?;
        let amount = Scalar::tlv_decode(reader.next(0x0002)?)?;
        reader.finish()?;
        return Ok(Self{mask, amount})
    }
}

impl TlvCodec for RctConfig {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + 4) + (HEAD_SIZE + 1)
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.bp_version, 0x0001, buf, 0)?;
        offset = encode_field(&self.range_proof_type, 0x0002, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let bp_version = u32::tlv_decode(reader.next(0x0001)?)?;
        let range_proof_type = RangeProofType::tlv_decode(reader.next(0x0002)?)?;
        reader.finish()?;
        return Ok(Self{range_proof_type, bp_version})
    }
}

impl TlvCodec for BoroSig {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + 32) + 2 * (HEAD_SIZE + BIT_RANGE * 32)
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.ee, 0x0001, buf, 0)?;
        offset = encode_field(&self.s0, 0x0002, buf, offset)?;
        offset = encode_field(&self.s1, 0x0003, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let ee = Scalar::tlv_decode(reader.next(0x0001)?)?;
        let s0 = Vec::<Scalar>::tlv_decode(reader.next(0x0002)?)?;
        let s1 = Vec::<Scalar>::tlv_decode(reader.next(0x0003)?)?;
        reader.finish()?;
        //the wire shape is a fixed 64-element pair of response vectors
        if s0.len() != BIT_RANGE || s1.len() != BIT_RANGE {
            return Err(SerializationError::DecodingError)
        }
        return Ok(Self{s0, s1, ee})
    }
}

impl TlvCodec for RangeSig {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + self.asig.tlv_size()) + (HEAD_SIZE + BIT_RANGE * 32)
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.asig, 0x0001, buf, 0)?;
        offset = encode_field(&self.ci, 0x0002, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let asig = BoroSig::tlv_decode(reader.next(0x0001)?)?;
        let ci = Vec::<Commitment>::tlv_decode(reader.next(0x0002)?)?;
        reader.finish()?;
        if ci.len() != BIT_RANGE {
            return Err(SerializationError::DecodingError)
        }
        return Ok(Self{asig, ci})
    }
}

impl TlvCodec for Bulletproof {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + self.v.tlv_size())
            + 4 * (HEAD_SIZE + 32)              //A, S, T1, T2
            + 2 * (HEAD_SIZE + 32)              //taux, mu
            + (HEAD_SIZE + self.l.tlv_size())
            + (HEAD_SIZE + self.r.tlv_size())
            + 3 * (HEAD_SIZE + 32)              //a, b, t
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.v, 0x0001, buf, 0)?;
        offset = encode_field(&self.a, 0x0002, buf, offset)?;
        offset = encode_field(&self.s, 0x0003, buf, offset)?;
        offset = encode_field(&self.t1, 0x0004, buf, offset)?;
        offset = encode_field(&self.t2, 0x0005, buf, offset)?;
        offset = encode_field(&self.taux, 0x0006, buf, offset)?;
        offset = encode_field(&self.mu, 0x0007, buf, offset)?;
        offset = encode_field(&self.l, 0x0008, buf, offset)?;
        offset = encode_field(&self.r, 0x0009, buf, offset)?;
        offset = encode_field(&self.aa, 0x000a, buf, offset)?;
        offset = encode_field(&self.bb, 0x000b, buf, offset)?;
        offset = encode_field(&self.tt, 0x000c, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let v = Vec::<Commitment>::tlv_decode(reader.next(0x0001)?)?;
        let a = RistrettoPoint::tlv_decode(reader.next(0x0002)?)?;
        let s = RistrettoPoint::tlv_decode(reader.next(0x0003)?)?;
        let t1 = RistrettoPoint::tlv_decode(reader.next(0x0004)?)?;
        let t2 = RistrettoPoint::tlv_decode(reader.next(0x0005)?)?;
        let taux = Scalar::tlv_decode(reader.next(0x0006)?)?;
        let mu = Scalar::tlv_decode(reader.next(0x0007)?)?;
        let l = Vec::<RistrettoPoint>::tlv_decode(reader.next(0x0008)?)?;
        let r = Vec::<RistrettoPoint>::tlv_decode(reader.next(0x0009)?)?;
        let aa = Scalar::tlv_decode(reader.next(0x000a)?)?;
        let bb = Scalar::tlv_decode(reader.next(0x000b)?)?;
        let tt = Scalar::tlv_decode(reader.next(0x000c)?)?;
        reader.finish()?;
        return Ok(Self{v, a, s, t1, t2, taux, mu, l, r, aa, bb, tt})
    }
}

impl TlvCodec for MgSig {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + 32)
            + (HEAD_SIZE + self.ii.tlv_size())
            + (HEAD_SIZE + self.ss.tlv_size())
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.cc, 0x0001, buf, 0)?;
        offset = encode_field(&self.ii, 0x0002, buf, offset)?;
        offset = encode_field(&self.ss, 0x0003, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let cc = Scalar::tlv_decode(reader.next(0x0001)?)?;
        let ii = Vec::<RistrettoPoint>::tlv_decode(reader.next(0x0002)?)?;
        let ss = Vec::<Vec<Scalar>>::tlv_decode(reader.next(0x0003)?)?;
        reader.finish()?;
        return Ok(Self{ss, cc, ii})
    }
}

impl TlvCodec for RctSigBase {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + 1)
            + (HEAD_SIZE + 32)
            + (HEAD_SIZE + self.mix_ring.tlv_size())
            + (HEAD_SIZE + self.pseudo_outs.tlv_size())
            + (HEAD_SIZE + self.ecdh_info.tlv_size())
            + (HEAD_SIZE + self.out_pk.tlv_size())
            + (HEAD_SIZE + 8)
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.rct_type, 0x0001, buf, 0)?;
        offset = encode_field(&self.message, 0x0002, buf, offset)?;
        offset = encode_field(&self.mix_ring, 0x0003, buf, offset)?;
        offset = encode_field(&self.pseudo_outs, 0x0004, buf, offset)?;
        offset = encode_field(&self.ecdh_info, 0x0005, buf, offset)?;
        offset = encode_field(&self.out_pk, 0x0006, buf, offset)?;
        offset = encode_field(&self.txn_fee, 0x0007, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let rct_type = RctType::tlv_decode(reader.next(0x0001)?)?;
        let message = Key::tlv_decode(reader.next(0x0002)?)?;
        let mix_ring = Vec::<Vec<PublicCtKey>>::tlv_decode(reader.next(0x0003)?)?;
        let pseudo_outs = Vec::<Commitment>::tlv_decode(reader.next(0x0004)?)?;
        let ecdh_info = Vec::<EcdhTuple>::tlv_decode(reader.next(0x0005)?)?;
        let out_pk = Vec::<PublicCtKey>::tlv_decode(reader.next(0x0006)?)?;
        let txn_fee = u64::tlv_decode(reader.next(0x0007)?)?;
        reader.finish()?;
        return Ok(Self{rct_type, message, mix_ring, pseudo_outs, ecdh_info, out_pk, txn_fee})
    }
}

impl TlvCodec for RctSigPrunable {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + self.range_sigs.tlv_size())
            + (HEAD_SIZE + self.bulletproofs.tlv_size())
            + (HEAD_SIZE + self.mgs.tlv_size())
            + (HEAD_SIZE + self.pseudo_outs.tlv_size())
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.range_sigs, 0x0001, buf, 0)?;
        offset = encode_field(&self.bulletproofs, 0x0002, buf, offset)?;
        offset = encode_field(&self.mgs, 0x0003, buf, offset)?;
        offset = encode_field(&self.pseudo_outs, 0x0004, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let range_sigs = Vec::<RangeSig>::tlv_decode(reader.next(0x0001)?)?;
        let bulletproofs = Vec::<Bulletproof>::tlv_decode(reader.next(0x0002)?)?;
        let mgs = Vec::<MgSig>::tlv_decode(reader.next(0x0003)?)?;
        let pseudo_outs = Vec::<Commitment>::tlv_decode(reader.next(0x0004)?)?;
        reader.finish()?;
        return Ok(Self{range_sigs, bulletproofs, mgs, pseudo_outs})
    }
}

impl TlvCodec for RctSig {
    fn tlv_size(&self) -> usize {
        return (HEAD_SIZE + self.p.tlv_size()) + (HEAD_SIZE + self.base.tlv_size())
    }
    fn tlv_encode(&self, buf: &mut [u8]) -> Result<usize, SerializationError> {
        let mut offset = encode_field(&self.p, 0x0001, buf, 0)?;
        offset = encode_field(&self.base, 0x0002, buf, offset)?;
        return Ok(offset)
    }
    fn tlv_decode(data: &[u8]) -> Result<Self, SerializationError> {
        let mut reader = FieldReader::new(data);
        let p = RctSigPrunable::tlv_decode(reader.next(0x0001)?)?;
        let base = RctSigBase::tlv_decode(reader.next(0x0002)?)?;
        reader.finish()?;
        return Ok(Self{base, p})
    }

} impl RctSig {
    ///Decode a signature and reject it if its type tag is not the one the
    ///given configuration produces. A mismatch between the wire tag and
    ///the active configuration is a structural failure, never silently
    ///resolved in favor of either field.
    pub fn tlv_decode_checked(data: &[u8], config: &RctConfig) -> Result<Self, SerializationError> {
        let sig = Self::tlv_decode(data)?;
        if !config.matches(sig.base.rct_type) {
            return Err(SerializationError::DecodingError)
        }
        return Ok(sig)
    }
}
