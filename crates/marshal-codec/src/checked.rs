use bytes::{Buf, BufMut, Bytes, BytesMut};
use marshal_core::ByteBuffer;
use tracing::warn;

use crate::checksum::additive_checksum;
use crate::config::CodecConfig;
use crate::error::{DecodeError, EncodeError};

/// 校验和帧的固定开销：`dataLen(4)` + `checksum(4)`。
pub const CHECKED_OVERHEAD: usize = 8;

/// 待编码的校验和帧。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksummedFrame {
    /// 数据区。
    pub data: Bytes,
}

impl ChecksummedFrame {
    /// 构造帧。
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

/// 校验和帧的解码结果。
///
/// 校验失败不是错误：`valid` 为 `false` 时，其余字段仍如实反映输入。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedFrame {
    /// 长度字段与校验和之间的字节。
    pub data: Bytes,
    /// 头部声明的数据长度。
    pub declared_len: u32,
    /// 帧尾记录的校验和。
    pub checksum: u32,
    /// 对校验和之前全部字节重新计算的结果。
    pub computed: u32,
    /// 声明长度与实际一致且校验和匹配。
    pub valid: bool,
}

/// `dataLen(4) | data | checksum(4)` 帧编解码器。
///
/// # 契约说明（What）
/// - 校验和覆盖长度字段与数据区；
/// - 输入短于 8 字节时返回 [`DecodeError::Truncated`]；
/// - 数据区超过配置的 `max_payload_len` 时返回 [`DecodeError::PayloadTooLarge`]；
/// - 其余情况都解码成功，声明长度与帧尺寸不符、校验和不符只体现在 [`CheckedFrame::valid`] 上。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumCodec {
    config: CodecConfig,
}

impl ChecksumCodec {
    /// 使用给定配置。
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// 帧编码后的总字节数。
    pub fn encoded_len(&self, frame: &ChecksummedFrame) -> usize {
        CHECKED_OVERHEAD + frame.data.len()
    }

    /// 编码为独立的字节序列。
    pub fn encode(&self, frame: &ChecksummedFrame) -> Result<Bytes, EncodeError> {
        let len = self.config.length_field(frame.data.len())?;
        let mut out = BytesMut::with_capacity(self.encoded_len(frame));
        out.put_u32_le(len);
        out.put_slice(&frame.data);
        let checksum = additive_checksum(&out);
        out.put_u32_le(checksum);
        Ok(out.freeze())
    }

    /// 编码到 `buffer` 的 `offset` 处，返回写入字节数；放不下时缓冲不被修改。
    pub fn encode_into(
        &self,
        frame: &ChecksummedFrame,
        buffer: &mut ByteBuffer,
        offset: usize,
    ) -> Result<usize, EncodeError> {
        let len = self.config.length_field(frame.data.len())?;
        let total = self.encoded_len(frame);
        buffer.span(offset, total)?;
        buffer.write_u32(offset, len)?;
        buffer.write_bytes(offset + 4, &frame.data)?;
        let body_end = offset + 4 + frame.data.len();
        let checksum = additive_checksum(buffer.read_bytes(offset, body_end - offset)?);
        buffer.write_u32(body_end, checksum)?;
        Ok(total)
    }

    /// 解码并校验一帧。
    pub fn decode(&self, input: &[u8]) -> Result<CheckedFrame, DecodeError> {
        if input.len() < CHECKED_OVERHEAD {
            return Err(DecodeError::Truncated {
                needed: CHECKED_OVERHEAD,
                actual: input.len(),
            });
        }
        let (body, mut trailer) = input.split_at(input.len() - 4);
        let mut header = body;
        let declared_len = header.get_u32_le();
        let data = header;
        self.config.check_declared(data.len())?;
        let checksum = trailer.get_u32_le();
        let computed = additive_checksum(body);

        let length_ok = declared_len as usize == data.len();
        let valid = length_ok && checksum == computed;
        if !valid {
            warn!(
                declared_len,
                actual_len = data.len(),
                checksum,
                computed,
                "checksummed frame failed validation"
            );
        }
        Ok(CheckedFrame {
            data: Bytes::copy_from_slice(data),
            declared_len,
            checksum,
            computed,
            valid,
        })
    }

    /// 从 `buffer` 的 `offset..offset + len` 解码一帧。
    pub fn decode_from(
        &self,
        buffer: &ByteBuffer,
        offset: usize,
        len: usize,
    ) -> Result<CheckedFrame, DecodeError> {
        self.decode(buffer.read_bytes(offset, len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn empty_data_frame_is_eight_bytes() {
        let codec = ChecksumCodec::default();
        let bytes = codec.encode(&ChecksummedFrame::new(Bytes::new())).expect("编码失败");
        assert_eq!(&bytes[..], &[0u8; 8]);
        let frame = codec.decode(&bytes).expect("解码失败");
        assert!(frame.valid);
        assert!(frame.data.is_empty());
    }

    #[test]
    fn checksum_covers_length_field() {
        let codec = ChecksumCodec::default();
        let bytes = codec
            .encode(&ChecksummedFrame::new(Bytes::from_static(&[0x10, 0x20])))
            .expect("编码失败");
        assert_eq!(&bytes[..], &[2, 0, 0, 0, 0x10, 0x20, 0x32, 0, 0, 0]);
    }

    #[traced_test]
    #[test]
    fn declared_length_disagreement_is_data_not_error() {
        let codec = ChecksumCodec::default();
        let mut bytes = codec
            .encode(&ChecksummedFrame::new(&b"abcd"[..]))
            .expect("编码失败")
            .to_vec();
        bytes[0] = 9;
        let frame = codec.decode(&bytes).expect("只有截断才是错误");
        assert!(!frame.valid);
        assert_eq!(frame.declared_len, 9);
        assert_eq!(&frame.data[..], b"abcd");
        assert!(logs_contain("failed validation"));
    }

    #[test]
    fn seven_bytes_are_truncated() {
        let codec = ChecksumCodec::default();
        assert_eq!(
            codec.decode(&[0; 7]),
            Err(DecodeError::Truncated {
                needed: 8,
                actual: 7
            })
        );
    }
}
