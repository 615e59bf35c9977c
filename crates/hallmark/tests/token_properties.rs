//! Property tests for identifier issuance and verification.
//!
//! Every verifier must be total over hostile input: arbitrary bytes return
//! `false` and never panic.

use std::sync::OnceLock;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use hallmark::{TokenEngine, captcha, data, time_encoding};
use hallmark_common::constants::{HASH_SIZE, TIME_ENCODING_LEN};
use proptest::prelude::*;
use tokio_test::{assert_err, assert_ok};

fn engine() -> &'static TokenEngine {
    static ENGINE: OnceLock<TokenEngine> = OnceLock::new();
    ENGINE.get_or_init(|| TokenEngine::generate().expect("OS randomness"))
}

fn fuzz_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 20, 0, 0).unwrap()
}

fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (-10_000_000_000i64..10_000_000_000i64, 0u32..1_000_000_000u32)
        .prop_map(|(secs, nanos)| DateTime::from_timestamp(secs, nanos).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn arbitrary_input_never_verifies(
        id in proptest::collection::vec(any::<u8>(), 0..96),
        payload in proptest::collection::vec(any::<u8>(), 0..64),
        size in 0usize..64,
    ) {
        let day = TimeDelta::hours(24);
        prop_assert!(!engine().verify(&id, &payload));
        prop_assert!(!engine().verify_captcha(&id, &payload, size));
        prop_assert!(!engine().verify_timed(&id, &payload, fuzz_time(), day));
        prop_assert!(!engine().verify_timed_captcha(&id, &payload, fuzz_time(), day, size));
        prop_assert!(!captcha::verify_timed(&id, &payload, fuzz_time(), day, size));
        prop_assert!(!data::verify_timed(&id, &payload, fuzz_time(), day));
    }

    #[test]
    fn single_bit_flip_in_undated_id_rejected(
        payload in proptest::collection::vec(any::<u8>(), 1..64),
        bit in 0usize..(HASH_SIZE * 8),
    ) {
        let mut id = engine().sign(&payload);
        prop_assert!(engine().verify(&id, &payload));
        id[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!engine().verify(&id, &payload));
    }

    #[test]
    fn single_bit_flip_in_timed_id_rejected(
        payload in proptest::collection::vec(any::<u8>(), 0..32),
        bit in 0usize..((TIME_ENCODING_LEN + HASH_SIZE) * 8),
    ) {
        let mut id = engine().sign_timed(fuzz_time(), &payload).unwrap();
        id[bit / 8] ^= 1 << (bit % 8);
        let window = TimeDelta::days(365 * 100);
        prop_assert!(!engine().verify_timed(&id, &payload, fuzz_time(), window));
    }

    #[test]
    fn timed_roundtrip(
        at in instant(),
        payload in proptest::collection::vec(any::<u8>(), 0..64),
        window_secs in 1i64..10_000_000,
    ) {
        let id = engine().sign_timed(at, &payload).unwrap();
        let window = TimeDelta::seconds(window_secs);
        prop_assert!(engine().verify_timed(&id, &payload, at, window));
        prop_assert!(engine().verify_timed(&id, &payload, at + window, window));
        let expired = at + window + TimeDelta::nanoseconds(1);
        prop_assert!(!engine().verify_timed(&id, &payload, expired, window));
        prop_assert!(!engine().verify_timed(&id, &payload, at - TimeDelta::nanoseconds(1), window));
    }

    #[test]
    fn spliced_time_encoding_rejected(
        at in instant(),
        other in instant(),
        payload in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        prop_assume!(at != other);
        let id = engine().sign_timed(at, &payload).unwrap();
        let mut spliced = time_encoding::encode(&other).unwrap().to_vec();
        spliced.extend_from_slice(&id[TIME_ENCODING_LEN..]);

        let now = if other > at { other } else { at };
        let window = TimeDelta::days(365 * 1000);
        prop_assert!(!engine().verify_timed(&spliced, &payload, now, window));
    }
}

#[test]
fn shared_engine_cross_thread_identifiers() {
    let (id, payload) = assert_ok!(captcha::get(6));
    let verified: Vec<bool> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| captcha::verify(&id, &payload, 6)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(verified.into_iter().all(|ok| ok));
    assert!(hallmark::is_initialized());
}

#[test]
fn independent_engines_disagree() {
    let other = assert_ok!(TokenEngine::generate());
    let (id, payload) = assert_ok!(engine().issue_captcha(6));
    assert!(engine().verify_captcha(&id, &payload, 6));
    assert!(!other.verify_captcha(&id, &payload, 6));
}

#[test]
fn issuance_errors_surface() {
    assert_err!(captcha::get(0));
    assert_err!(captcha::get_timed(fuzz_time(), 0));
    assert_err!(hallmark::random_payload(0));
}

#[test]
fn fuzz_corpus_style_scenario() {
    // Ids issued one nanosecond apart, checked a day later.
    let mut t = fuzz_time();
    for size in 1..=100 {
        t -= TimeDelta::nanoseconds(1);
        let (id, payload) = assert_ok!(captcha::get_timed(t, size));
        assert!(captcha::verify_timed(&id, &payload, fuzz_time(), TimeDelta::hours(24), size));
    }
}
