/// 逐字节无符号累加，结果对 2^32 取模。
///
/// # 契约说明（What）
/// - 任意单字节改动都会改变结果（改动量在 `-255..=255` 且非零，不会在模 2^32 下归零）；
/// - 字节交换、成对抵消的改动无法被发现，只能用于发现传输损坏，不能防篡改。
///
/// ```
/// use marshal_codec::additive_checksum;
/// assert_eq!(additive_checksum(&[0xFF, 0x01, 0x02]), 0x102);
/// ```
pub fn additive_checksum(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &byte| acc.wrapping_add(u32::from(byte)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_sums_to_zero() {
        assert_eq!(additive_checksum(&[]), 0);
    }

    #[test]
    fn swapped_bytes_are_not_detected() {
        assert_eq!(additive_checksum(&[1, 2, 3]), additive_checksum(&[3, 2, 1]));
    }
}
