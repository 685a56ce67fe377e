// Reference frames with their CRC bytes.

pub fn frame(hex_str: &str) -> Vec<u8> {
    hex::decode(hex_str.replace(' ', "")).expect("fixture is valid hex")
}

/// SELECT NDEF application, block number 0.
pub fn select_application_request() -> Vec<u8> {
    frame("02 00 a4 04 00 07 d2 76 00 00 85 01 01 00 35 c0")
}

/// SELECT NDEF application with DID 0x01.
pub fn select_application_request_did() -> Vec<u8> {
    frame("0a 01 00 a4 04 00 07 d2 76 00 00 85 01 01 00 3e 54")
}

/// READ BINARY offset 0, 16 bytes, block number 0.
pub fn read_16_request() -> Vec<u8> {
    frame("02 00 b0 00 00 10 f8 4e")
}

/// VERIFY read password with sixteen zero bytes, block number 0.
pub fn verify_read_default_request() -> Vec<u8> {
    frame("02 00 20 00 01 10 00000000000000000000000000000000 81 d2")
}

pub fn ok_response() -> Vec<u8> {
    frame("02 90 00 f1 09")
}

pub fn ok_response_did() -> Vec<u8> {
    frame("0a 01 90 00 2f c9")
}

pub fn file_not_found_response() -> Vec<u8> {
    frame("02 6a 82 93 2f")
}

pub fn wtx_request_fwt1() -> Vec<u8> {
    frame("f2 01 91 40")
}

pub fn ndef_bytes() -> Vec<u8> {
    (0u8..16).map(|i| i.wrapping_mul(17)).collect()
}
