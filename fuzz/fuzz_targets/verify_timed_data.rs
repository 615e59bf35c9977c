//! Timed data verification on arbitrary identifier bytes.

#![no_main]

use chrono::{TimeDelta, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|id: &[u8]| {
    let now = Utc.with_ymd_and_hms(2020, 1, 1, 20, 0, 0).unwrap();
    assert!(!hallmark::data::verify_timed(id, b"test", now, TimeDelta::days(1)));
});
