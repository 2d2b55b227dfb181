// SPDX short identifier: Unlicense

use std::cell::RefCell;

use rand::{thread_rng, Rng};

use xrct::{
    common::*,
    ecdh::{self, SharedSecret},
    rct::{
        gen_rct,
        gen_rct_simple,
        ver_rct,
        ver_rct_simple,
        ver_rct_simple_with_observer,
        ver_rct_semantics_simple,
        ver_rct_non_semantics_simple,
        RctObserver,
        RctCheck
    }
};

const MESSAGE: Key = [7u8; 32];

fn borromean_config() -> RctConfig {
    return RctConfig{range_proof_type: RangeProofType::Borromean, bp_version: 0}
}

fn bulletproof2_config() -> RctConfig {
    return RctConfig{range_proof_type: RangeProofType::PaddedBulletproof, bp_version: 2}
}

fn random_ct_key() -> PublicCtKey {
    return PublicCtKey::new(random_point(), Commitment(random_point()))
}

///Build one input's worth of secrets plus a ring hiding it at a random index.
fn simple_input(amount: u64, ring_size: usize) -> (PrivateCtKey, Vec<PublicCtKey>, usize) {
    let sk = PrivateCtKey::new(random_scalar(), random_scalar());
    let index = thread_rng().gen::<usize>() % ring_size;

    let mut ring: Vec<PublicCtKey> = (0..ring_size).map(|_| random_ct_key()).collect();
    ring[index] = sk.to_public(amount);
    return (sk, ring, index)
}

///Everything gen_rct_simple needs for the given amounts.
fn simple_params(
    in_amounts: &Vec<u64>, out_count: usize, ring_size: usize
) -> (Vec<PrivateCtKey>, Vec<Vec<PublicCtKey>>, Vec<usize>, Vec<RistrettoPoint>, Vec<SharedSecret>) {
    let mut in_sk: Vec<PrivateCtKey> = Vec::new();
    let mut mix_ring: Vec<Vec<PublicCtKey>> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();
    for amount in in_amounts {
        let (sk, ring, index) = simple_input(*amount, ring_size);
        in_sk.push(sk);
        mix_ring.push(ring);
        indices.push(index);
    }

    let destinations: Vec<RistrettoPoint> = (0..out_count).map(|_| random_point()).collect();
    let amount_keys: Vec<SharedSecret> = (0..out_count)
        .map(|_| SharedSecret::from_point(&random_point())).collect();
    return (in_sk, mix_ring, indices, destinations, amount_keys)
}

#[test]
fn full_rct_test() {
    let in_amounts: Vec<u64> = vec!(10, 20);
    let out_amounts: Vec<u64> = vec!(25, 4);
    let txn_fee = 1u64;
    let ring_size = 4;
    let index = thread_rng().gen::<usize>() % ring_size;

    let in_sk: Vec<PrivateCtKey> = (0..in_amounts.len())
        .map(|_| PrivateCtKey::new(random_scalar(), random_scalar())).collect();

    //full mode: one column of keys per ring member
    let mut mix_ring: Vec<Vec<PublicCtKey>> = (0..ring_size)
        .map(|_| (0..in_sk.len()).map(|_| random_ct_key()).collect())
        .collect();
    for i in 0..in_sk.len() {
        mix_ring[index][i] = in_sk[i].to_public(in_amounts[i]);
    }

    let destinations: Vec<RistrettoPoint> = (0..out_amounts.len()).map(|_| random_point()).collect();
    let amount_keys: Vec<SharedSecret> = (0..out_amounts.len())
        .map(|_| SharedSecret::from_point(&random_point())).collect();

    let (sig, _out_sk) = gen_rct(
        MESSAGE, &in_sk, &destinations, &out_amounts, &amount_keys,
        &mix_ring, index, txn_fee, borromean_config()).unwrap();

    assert_eq!(sig.base.rct_type, RctType::Full);
    assert!(ver_rct(&sig));

    //a tampered fee breaks both the balance row and the signed message
    let mut tampered = sig.clone();
    tampered.base.txn_fee += 1;
    assert!(!ver_rct(&tampered));

    //a tampered message breaks the MLSAG
    let mut tampered = sig.clone();
    tampered.base.message = [8u8; 32];
    assert!(!ver_rct(&tampered));

    //a full signature is not a simple signature
    assert!(!ver_rct_simple(&sig));
}

#[test]
fn full_rct_unbalanced_test() {
    let in_amounts: Vec<u64> = vec!(10);
    let out_amounts: Vec<u64> = vec!(11);

    let in_sk: Vec<PrivateCtKey> = vec!(PrivateCtKey::new(random_scalar(), random_scalar()));
    let mut mix_ring: Vec<Vec<PublicCtKey>> = vec!(vec!(random_ct_key()), vec!(random_ct_key()));
    mix_ring[0][0] = in_sk[0].to_public(in_amounts[0]);

    //outputs exceed inputs: the balance row cannot be opened
    let result = gen_rct(
        MESSAGE, &in_sk, &vec!(random_point()), &out_amounts,
        &vec!(SharedSecret::from_point(&random_point())),
        &mix_ring, 0, 0, borromean_config());
    assert!(matches!(result, Err(RctError::Unbalanced)));
}

///The concrete scenario from the design notes: 2 inputs (5, 7) and
///2 outputs (3, 9) with fee 0 must verify, and bumping the second output
///amount afterwards must fail the balance semantics.
fn simple_rct_scenario(config: RctConfig, expected_type: RctType) {
    let in_amounts: Vec<u64> = vec!(5, 7);
    let out_amounts: Vec<u64> = vec!(3, 9);

    let (in_sk, mix_ring, indices, destinations, amount_keys) =
        simple_params(&in_amounts, out_amounts.len(), 3);

    let (sig, out_sk) = gen_rct_simple(
        MESSAGE, &in_sk, &in_amounts, &destinations, &out_amounts,
        &amount_keys, &mix_ring, &indices, 0, config).unwrap();

    assert_eq!(sig.base.rct_type, expected_type);
    assert_eq!(sig.pseudo_outs().len(), in_amounts.len());
    assert!(ver_rct_semantics_simple(&sig));
    assert!(ver_rct_non_semantics_simple(&sig));
    assert!(ver_rct_simple(&sig));

    //a simple signature is not a full signature
    assert!(!ver_rct(&sig));

    //change the second output amount to 8 without regenerating anything:
    //the cheap semantics (balance) check must already reject it
    let mut tampered = sig;
    tampered.base.out_pk[1].mask = Commitment::commit(8, out_sk[1]);
    assert!(!ver_rct_semantics_simple(&tampered));
    assert!(!ver_rct_simple(&tampered));
}

#[test]
fn simple_rct_borromean_test() {
    simple_rct_scenario(borromean_config(), RctType::Simple);
}

#[test]
fn simple_rct_bulletproof_test() {
    simple_rct_scenario(bulletproof2_config(), RctType::Bulletproof2);
}

#[test]
fn simple_rct_pseudo_out_placement_test() {
    let in_amounts: Vec<u64> = vec!(6);
    let out_amounts: Vec<u64> = vec!(6);
    let (in_sk, mix_ring, indices, destinations, amount_keys) =
        simple_params(&in_amounts, 1, 2);

    //Simple carries pseudo-outs in the base
    let (sig, _) = gen_rct_simple(
        MESSAGE, &in_sk, &in_amounts, &destinations, &out_amounts,
        &amount_keys, &mix_ring, &indices, 0, borromean_config()).unwrap();
    assert!(!sig.base.pseudo_outs.is_empty());
    assert!(sig.p.pseudo_outs.is_empty());

    //Bulletproof types carry them in the prunable half
    let (sig, _) = gen_rct_simple(
        MESSAGE, &in_sk, &in_amounts, &destinations, &out_amounts,
        &amount_keys, &mix_ring, &indices, 0, bulletproof2_config()).unwrap();
    assert!(sig.base.pseudo_outs.is_empty());
    assert!(!sig.p.pseudo_outs.is_empty());

    //moving them to the wrong half is a structural failure
    let mut misplaced = sig;
    misplaced.base.pseudo_outs = misplaced.p.pseudo_outs.clone();
    misplaced.p.pseudo_outs = Vec::new();
    assert!(!ver_rct_semantics_simple(&misplaced));
}

#[test]
fn simple_rct_ecdh_recovery_test() {
    for config in [borromean_config(), bulletproof2_config()] {
        let in_amounts: Vec<u64> = vec!(100);
        let out_amounts: Vec<u64> = vec!(60, 39);
        let (in_sk, mix_ring, indices, destinations, amount_keys) =
            simple_params(&in_amounts, out_amounts.len(), 3);

        let (sig, _) = gen_rct_simple(
            MESSAGE, &in_sk, &in_amounts, &destinations, &out_amounts,
            &amount_keys, &mix_ring, &indices, 1, config).unwrap();

        let short = sig.base.rct_type.has_short_amounts();
        for i in 0..out_amounts.len() {
            //the receiver recovers (mask, amount) with the shared secret...
            let opened = ecdh::decode(&sig.base.ecdh_info[i], &amount_keys[i], short);
            let amount = ecdh::scalar_as_amount(&opened.amount);
            assert_eq!(amount, out_amounts[i]);

            //...and checks them against the output commitment
            assert_eq!(Commitment::commit(amount, opened.mask), sig.base.out_pk[i].mask);

            //the wrong secret opens to garbage that fails that check
            let wrong = ecdh::decode(
                &sig.base.ecdh_info[i], &SharedSecret::from_point(&random_point()), short);
            assert!(Commitment::commit(
                ecdh::scalar_as_amount(&wrong.amount), wrong.mask) != sig.base.out_pk[i].mask);
        }
    }
}

#[test]
fn simple_rct_unbalanced_test() {
    let in_amounts: Vec<u64> = vec!(5, 7);
    let out_amounts: Vec<u64> = vec!(5, 8);
    let (in_sk, mix_ring, indices, destinations, amount_keys) =
        simple_params(&in_amounts, out_amounts.len(), 2);

    let result = gen_rct_simple(
        MESSAGE, &in_sk, &in_amounts, &destinations, &out_amounts,
        &amount_keys, &mix_ring, &indices, 0, borromean_config());
    assert!(matches!(result, Err(RctError::Unbalanced)));
}

struct Recorder(RefCell<Vec<(RctCheck, bool)>>);
impl RctObserver for Recorder {
    fn on_check(&self, check: RctCheck, ok: bool) {
        self.0.borrow_mut().push((check, ok));
    }
}

#[test]
fn simple_rct_observer_test() {
    let in_amounts: Vec<u64> = vec!(2, 3);
    let out_amounts: Vec<u64> = vec!(4);
    let (in_sk, mix_ring, indices, destinations, amount_keys) =
        simple_params(&in_amounts, out_amounts.len(), 2);

    let (sig, _) = gen_rct_simple(
        MESSAGE, &in_sk, &in_amounts, &destinations, &out_amounts,
        &amount_keys, &mix_ring, &indices, 1, borromean_config()).unwrap();

    let recorder = Recorder(RefCell::new(Vec::new()));
    assert!(ver_rct_simple_with_observer(&sig, Some(&recorder)));

    let events = recorder.0.into_inner();
    assert!(events.contains(&(RctCheck::Semantics, true)));
    assert!(events.contains(&(RctCheck::Balance, true)));
    assert!(events.contains(&(RctCheck::RangeProof(0), true)));
    assert!(events.contains(&(RctCheck::RingSignature(0), true)));
    assert!(events.contains(&(RctCheck::RingSignature(1), true)));
    assert!(events.iter().all(|(_, ok)| *ok));
}
