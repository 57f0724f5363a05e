use lib_imretro::image::format::SIGNATURE;

/// Builds the 11-byte header: signature, mode byte, and the two 12-bit
/// dimensions packed into three bytes.
pub fn header(mode: u8, width: u16, height: u16) -> Vec<u8> {
    let mut bytes = SIGNATURE.to_vec();
    bytes.push(mode);
    bytes.push((width >> 4) as u8);
    bytes.push((((width & 0xF) << 4) | (height >> 8)) as u8);
    bytes.push((height & 0xFF) as u8);
    bytes
}

/// Header followed by arbitrary payload bytes (palette and/or pixels).
pub fn image_bytes(mode: u8, width: u16, height: u16, payload: &[u8]) -> Vec<u8> {
    let mut bytes = header(mode, width, height);
    bytes.extend_from_slice(payload);
    bytes
}
