// SPDX short identifier: Unlicense

use rand::{thread_rng, Rng};

use xrct::{
    common::*,
    ecdh::SharedSecret,
    rangeproof::{RangeSig, Bulletproof},
    signature::MgSig,
    rct::{gen_rct_simple, ver_rct_simple, RctSig}
};

///encode, decode, re-encode: the bytes must be stable
fn assert_stable<T: TlvCodec>(value: &T) -> T {
    let encoded = value.to_tlv().unwrap();
    let decoded = T::tlv_decode(&encoded).unwrap();
    assert_eq!(encoded, decoded.to_tlv().unwrap());
    return decoded
}

#[test]
fn primitive_roundtrip_test() {
    let scalar = random_scalar();
    assert_eq!(assert_stable(&scalar), scalar);

    let point = random_point();
    assert_eq!(assert_stable(&point), point);

    let commitment = Commitment::commit(thread_rng().gen::<u64>(), random_scalar());
    assert_eq!(assert_stable(&commitment), commitment);

    let fee: u64 = thread_rng().gen();
    assert_eq!(assert_stable(&fee), fee);

    let ct_key = PublicCtKey::new(random_point(), commitment);
    assert_eq!(assert_stable(&ct_key), ct_key);

    let tuple = EcdhTuple::new(random_scalar(), thread_rng().gen::<u64>());
    assert_eq!(assert_stable(&tuple), tuple);

    let config = RctConfig{range_proof_type: RangeProofType::PaddedBulletproof, bp_version: 2};
    assert_eq!(assert_stable(&config), config);

    let keys: Vec<Scalar> = (0..9).map(|_| random_scalar()).collect();
    assert_eq!(assert_stable(&keys), keys);

    let matrix: Vec<Vec<Scalar>> = (0..3)
        .map(|n| (0..n + 1).map(|_| random_scalar()).collect())
        .collect();
    assert_eq!(assert_stable(&matrix), matrix);

    let empty: Vec<Commitment> = Vec::new();
    assert_eq!(assert_stable(&empty), empty);
}

#[test]
fn proof_roundtrip_test() {
    let (commitment, range_sig) = RangeSig::prove(12345u64, random_scalar()).unwrap();
    assert_stable(&range_sig).verify(commitment).unwrap();

    let (_, bulletproof) = Bulletproof::prove(
        vec!(1u64, 2, 3), vec!(random_scalar(), random_scalar(), random_scalar())).unwrap();
    assert_stable(&bulletproof).verify().unwrap();

    let secrets = vec!(random_scalar(), random_scalar());
    let mut matrix: Vec<Vec<RistrettoPoint>> = (0..4)
        .map(|_| vec!(random_point(), random_point())).collect();
    matrix[1] = secrets.iter().map(|secret| secret * G).collect();
    let mg = MgSig::sign(b"abcdef", &matrix, &secrets, 1, 1);
    assert_stable(&mg).verify(b"abcdef", &matrix, 1).unwrap();
}

fn sample_signature(config: RctConfig) -> RctSig {
    let in_amounts: Vec<u64> = vec!(5, 7);
    let out_amounts: Vec<u64> = vec!(3, 9);

    let mut in_sk: Vec<PrivateCtKey> = Vec::new();
    let mut mix_ring: Vec<Vec<PublicCtKey>> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();
    for amount in &in_amounts {
        let sk = PrivateCtKey::new(random_scalar(), random_scalar());
        let mut ring: Vec<PublicCtKey> = (0..3)
            .map(|_| PublicCtKey::new(random_point(), Commitment(random_point()))).collect();
        ring[1] = sk.to_public(*amount);
        in_sk.push(sk);
        mix_ring.push(ring);
        indices.push(1);
    }

    let destinations: Vec<RistrettoPoint> = (0..2).map(|_| random_point()).collect();
    let amount_keys: Vec<SharedSecret> = (0..2)
        .map(|_| SharedSecret::from_point(&random_point())).collect();

    let (sig, _) = gen_rct_simple(
        [7u8; 32], &in_sk, &in_amounts, &destinations, &out_amounts,
        &amount_keys, &mix_ring, &indices, 0, config).unwrap();
    return sig
}

#[test]
fn rct_sig_roundtrip_test() {
    for config in [
        RctConfig{range_proof_type: RangeProofType::Borromean, bp_version: 0},
        RctConfig{range_proof_type: RangeProofType::PaddedBulletproof, bp_version: 2},
    ] {
        let sig = sample_signature(config);

        //the decoded signature is byte-stable and still verifies
        let decoded = assert_stable(&sig);
        assert!(ver_rct_simple(&decoded));

        //decoding under the generating config succeeds,
        //a type/config mismatch is a structural failure
        let encoded = sig.to_tlv().unwrap();
        RctSig::tlv_decode_checked(&encoded, &config).unwrap();
        let other = RctConfig{range_proof_type: RangeProofType::Borromean, bp_version: 1};
        if config.range_proof_type != RangeProofType::Borromean {
            assert!(RctSig::tlv_decode_checked(&encoded, &other).is_err());
        }
    }
}

#[test]
fn malformed_buffer_test() {
    let sig = sample_signature(
        RctConfig{range_proof_type: RangeProofType::Borromean, bp_version: 0});
    let encoded = sig.to_tlv().unwrap();

    //truncation anywhere must be a clean decode error
    assert!(RctSig::tlv_decode(&encoded[..encoded.len() - 1]).is_err());
    assert!(RctSig::tlv_decode(&encoded[..encoded.len() / 2]).is_err());
    assert!(RctSig::tlv_decode(&[]).is_err());

    //trailing garbage is rejected, not ignored
    let mut trailing = encoded.clone();
    trailing.push(0);
    assert!(RctSig::tlv_decode(&trailing).is_err());

    //a length prefix pointing past the buffer is rejected
    //(bytes 2..4 are the length of the outermost field)
    let mut overrun = encoded;
    overrun[2] = 0xff;
    overrun[3] = 0xff;
    assert!(RctSig::tlv_decode(&overrun).is_err());
}

#[test]
fn non_canonical_key_test() {
    let tuple = EcdhTuple::new(random_scalar(), 5);
    let mut encoded = tuple.to_tlv().unwrap();

    //the mask payload starts after the first header;
    //overwrite it with a value above the group order
    for byte in &mut encoded[4..36] {
        *byte = 0xff;
    }
    assert!(EcdhTuple::tlv_decode(&encoded).is_err());

    let ct_key = PublicCtKey::new(random_point(), Commitment(random_point()));
    let mut encoded = ct_key.to_tlv().unwrap();

    //most 32-byte strings are not canonical point encodings;
    //flipping the high byte of a compressed point is practically
    //guaranteed to produce one of them or a different point,
    //so decode must either fail or change the value
    encoded[35] ^= 0x80;
    match PublicCtKey::tlv_decode(&encoded) {
        Ok(decoded) => assert!(decoded != ct_key),
        Err(_) => ()
    }
}

#[test]
fn wire_format_test() {
    //headers are little-endian tag and length
    let keys: Vec<Scalar> = vec!(Scalar::one());
    let encoded = EcdhTuple::new(Scalar::one(), 2).to_tlv().unwrap();
    assert_eq!(&encoded[0..4], &[0x01, 0x00, 0x20, 0x00]);
    assert_eq!(&encoded[36..40], &[0x02, 0x00, 0x20, 0x00]);
    assert_eq!(encoded.len(), 72);

    //packed vectors carry no per-element headers
    assert_eq!(keys.to_tlv().unwrap().len(), 32);
}
