//! Timed captcha verification on hostile input.
//!
//! Arbitrary `(id, captcha, size)` triples go through the shared engine at a
//! fixed instant with a one-day window. No input may panic, and no input the
//! engine did not issue may verify.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    id: Vec<u8>,
    captcha: Vec<u8>,
    size: u8,
    /// XOR mask applied to a freshly issued id
    flip: Vec<u8>,
}

fn fuzz_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 20, 0, 0).unwrap()
}

fuzz_target!(|input: Input| {
    let engine = hallmark::shared_engine().unwrap();
    let window = TimeDelta::days(1);
    let size = usize::from(input.size);

    assert!(!engine.verify_timed_captcha(&input.id, &input.captcha, fuzz_time(), window, size));

    // Mutated copies of a genuine id must be rejected
    if size == 0 || input.flip.iter().all(|&b| b == 0) {
        return;
    }
    let (mut id, captcha) = engine.issue_timed_captcha(fuzz_time(), size).unwrap();
    for (byte, mask) in id.iter_mut().zip(&input.flip) {
        *byte ^= mask;
    }
    let changed = input.flip.iter().take(id.len()).any(|&b| b != 0);
    assert_eq!(
        engine.verify_timed_captcha(&id, &captcha, fuzz_time(), window, size),
        !changed
    );
});
