#![no_main]

use libfuzzer_sys::fuzz_target;
use proxlock_core::Credential;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let bytes = [data[0], data[1], data[2], data[3]];

    let credential = Credential::from_bytes(bytes);

    // Decode is the documented shift formula
    let expected = ((bytes[0] as u32) << 24)
        | ((bytes[1] as u32) << 16)
        | ((bytes[2] as u32) << 8)
        | (bytes[3] as u32);
    assert_eq!(credential.as_u32(), expected);

    // Round-trip
    assert_eq!(credential.to_bytes(), bytes);
    assert_eq!(credential.to_hex().len(), 8);
});
