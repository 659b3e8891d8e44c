// Synchsafe integers
//
// ID3v2 size fields store 7 bits per byte with the high bit clear, so a
// size can never look like an MPEG frame sync.

/// Largest value a 4-byte synchsafe field can hold
pub const MAX_SYNCHSAFE_U32: u32 = 0x0FFF_FFFF;

/// Decode big-endian synchsafe `bytes`, ignoring each byte's high bit.
pub fn decode_synchsafe(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 7) | u32::from(b & 0x7F))
}

/// Encode `value` as `n` synchsafe bytes.
///
/// Bits beyond `7 * n` are dropped; callers keep values in range.
pub fn encode_synchsafe(value: u32, n: usize) -> Vec<u8> {
    (0..n)
        .map(|i| {
            let shift = 7 * (n - 1 - i);
            if shift >= 32 {
                0
            } else {
                ((value >> shift) & 0x7F) as u8
            }
        })
        .collect()
}
