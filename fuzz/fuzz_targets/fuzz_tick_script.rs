#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary CSV bytes: header checks and row parsing must fail cleanly.
    let _ = cruise_config::parse_tick_script(data);
});
