use alloc::{string::String, vec::Vec};

/// 定宽文本字段的编码方式。
///
/// - `Utf8`：逐字节写入，首个 `0x00` 视为终止符；
/// - `Utf16Le`：以 2 字节小端码元写入，首个 `0x0000` 码元视为终止符。
///
/// 两种编码都不写入显式终止符：字段宽度恰好被填满时，读取到宽度末尾即结束。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8 字节序列。
    Utf8,
    /// UTF-16 小端码元序列（Win32 宽字符串）。
    Utf16Le,
}

impl TextEncoding {
    /// 将文本编码为字节，不附加终止符。
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text
                .encode_utf16()
                .flat_map(|unit| unit.to_le_bytes())
                .collect(),
        }
    }

    /// 从定宽字节区解码文本，遇到终止符即停止。
    ///
    /// 解码失败返回 `None`，由调用方补充偏移等上下文后转换为错误。
    pub fn decode(self, raw: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => {
                let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
                core::str::from_utf8(&raw[..end]).ok().map(String::from)
            }
            TextEncoding::Utf16Le => {
                let units: Vec<u16> = raw
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .take_while(|&unit| unit != 0)
                    .collect();
                String::from_utf16(&units).ok()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_round_trip_stops_at_terminator() {
        let mut raw = TextEncoding::Utf16Le.encode("Zoë");
        raw.extend_from_slice(&[0, 0, b'x', 0]);
        assert_eq!(TextEncoding::Utf16Le.decode(&raw).as_deref(), Some("Zoë"));
    }

    #[test]
    fn utf8_without_terminator_reads_full_width() {
        assert_eq!(TextEncoding::Utf8.decode(b"abcd").as_deref(), Some("abcd"));
    }

    #[test]
    fn lone_surrogate_is_rejected() {
        let raw = 0xd800u16.to_le_bytes();
        assert_eq!(TextEncoding::Utf16Le.decode(&raw), None);
    }
}
