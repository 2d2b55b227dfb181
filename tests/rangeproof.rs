// SPDX short identifier: Unlicense

use xrct::{
    common::*,
    rangeproof::{
        RangeSig,
        Bulletproof,
        BIT_RANGE,
        MAX_AGGREGATION_SIZE
    }
};

const AGGREGATION_SIZES: [usize; 5] = [1, 2, 3, 8, 16];

#[test]
fn borromean_test() {
    //prove
    let (commitment, proof) = RangeSig::prove(
        1234567890u64, random_scalar()).unwrap();

    //serialize
    let serialized = proof.to_tlv().unwrap();
    let deserialized = RangeSig::tlv_decode(&serialized).unwrap();

    //verify
    deserialized.verify(commitment).unwrap();

    //a different commitment must not verify
    let (other_commitment, _) = RangeSig::prove(
        1234567890u64, random_scalar()).unwrap();
    assert!(proof.verify(other_commitment).is_err());

    //test max/min values
    let (commitment, proof) = RangeSig::prove(
        0u64, random_scalar()).unwrap();
    proof.verify(commitment).unwrap();

    let (commitment, proof) = RangeSig::prove(
        ((1u128 << BIT_RANGE) - 1) as u64, random_scalar()).unwrap();
    proof.verify(commitment).unwrap();
}

#[test]
fn borromean_tamper_test() {
    let (commitment, proof) = RangeSig::prove(
        42u64, random_scalar()).unwrap();

    //flipping any response must break the closure
    let mut tampered = proof.clone();
    tampered.asig.s0[17] += Scalar::one();
    assert!(tampered.verify(commitment).is_err());

    let mut tampered = proof.clone();
    tampered.asig.s1[3] += Scalar::one();
    assert!(tampered.verify(commitment).is_err());

    let mut tampered = proof.clone();
    tampered.asig.ee += Scalar::one();
    assert!(tampered.verify(commitment).is_err());

    //swapping two bit-commitments changes every ring
    let mut tampered = proof;
    tampered.ci.swap(0, 1);
    assert!(tampered.verify(commitment).is_err());
}

#[test]
fn bulletproof_test() {
    for x in AGGREGATION_SIZES {
        let mut values: Vec<u64> = Vec::new();
        let mut blindings: Vec<Scalar> = Vec::new();
        for n in 0..x {
            values.push(1234567890 + n as u64);
            blindings.push(random_scalar());
        }

        //prove
        let (commitments, proof) = Bulletproof::prove(
            values, blindings).unwrap();
        assert_eq!(commitments, proof.v);

        //serialize
        let serialized = proof.to_tlv().unwrap();
        let deserialized = Bulletproof::tlv_decode(&serialized).unwrap();

        //verify
        deserialized.verify().unwrap();
    }

    //test max/min values
    let (_, proof) = Bulletproof::prove(
        vec!(0u64), vec!(random_scalar())).unwrap();
    proof.verify().unwrap();

    let (_, proof) = Bulletproof::prove(
        vec!(((1u128 << BIT_RANGE) - 1) as u64), vec!(random_scalar())).unwrap();
    proof.verify().unwrap();

    //the aggregation limit is enforced
    let too_many = MAX_AGGREGATION_SIZE + 1;
    assert!(Bulletproof::prove(
        vec!(1u64; too_many),
        (0..too_many).map(|_| random_scalar()).collect()
    ).is_err());
}

#[test]
fn bulletproof_round_count_test() {
    //a single 64-bit value folds in exactly 6 rounds
    let (_, proof) = Bulletproof::prove(
        vec!(1234567890u64), vec!(random_scalar())).unwrap();
    assert_eq!(proof.l.len(), 6);
    assert_eq!(proof.r.len(), 6);
    proof.verify().unwrap();

    //5 or 7 L/R pairs must be rejected structurally
    let mut short_proof = proof.clone();
    short_proof.l.pop();
    short_proof.r.pop();
    assert!(short_proof.verify().is_err());

    let mut long_proof = proof;
    long_proof.l.push(random_point());
    long_proof.r.push(random_point());
    assert!(long_proof.verify().is_err());
}

#[test]
fn bulletproof_tamper_test() {
    let (_, proof) = Bulletproof::prove(
        vec!(5u64, 9u64), vec!(random_scalar(), random_scalar())).unwrap();
    proof.verify().unwrap();

    let mut tampered = proof.clone();
    tampered.tt += Scalar::one();
    assert!(tampered.verify().is_err());

    let mut tampered = proof.clone();
    tampered.mu += Scalar::one();
    assert!(tampered.verify().is_err());

    let mut tampered = proof.clone();
    tampered.v[1] = Commitment::commit(10, random_scalar());
    assert!(tampered.verify().is_err());

    let mut tampered = proof;
    tampered.l[2] = random_point();
    assert!(tampered.verify().is_err());
}

#[test]
fn bulletproof_batch_test() {
    let mut proofs: Vec<Bulletproof> = Vec::new();
    for x in [1usize, 2, 4] {
        let values: Vec<u64> = (0..x).map(|n| 1000 + n as u64).collect();
        let blindings: Vec<Scalar> = (0..x).map(|_| random_scalar()).collect();
        let (_, proof) = Bulletproof::prove(values, blindings).unwrap();
        proofs.push(proof);
    }
    Bulletproof::verify_batch(&proofs).unwrap();

    //one bad proof fails the whole batch
    proofs[1].aa += Scalar::one();
    assert!(Bulletproof::verify_batch(&proofs).is_err());
}
