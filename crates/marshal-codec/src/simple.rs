use bytes::{Buf, BufMut, Bytes, BytesMut};
use marshal_core::ByteBuffer;
use tracing::warn;

use crate::config::CodecConfig;
use crate::error::{DecodeError, EncodeError};
use crate::kind::expect_magic;

/// 简单帧默认魔数。
pub const SIMPLE_MAGIC: [u8; 4] = *b"NPKT";

/// 简单帧头部长度：`magic(4) | type(2) | sequence(2) | payloadLen(4)`。
pub const SIMPLE_HEADER_LEN: usize = 12;

/// 简单帧：类型、序号与任意负载。
///
/// 长度字段不在结构体中出现，编码时总是由 `payload` 推导。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleFrame {
    /// 帧类型。
    pub frame_type: u16,
    /// 序号。
    pub sequence: u16,
    /// 负载。
    pub payload: Bytes,
}

impl SimpleFrame {
    /// 构造帧。
    pub fn new(frame_type: u16, sequence: u16, payload: impl Into<Bytes>) -> Self {
        Self {
            frame_type,
            sequence,
            payload: payload.into(),
        }
    }

    /// 负载字节数，即编码后长度字段的值。
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// 负载为 UTF-8 文本时返回其字符串视图。
    pub fn payload_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.payload).ok()
    }
}

/// 简单帧编解码器。
///
/// # 契约说明（What）
/// - 编码输出 `SIMPLE_HEADER_LEN + payload.len()` 字节；
/// - 解码时先比较魔数，再检查头部长度，最后要求声明长度恰好等于头部之后的字节数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleFrameCodec {
    magic: [u8; 4],
    config: CodecConfig,
}

impl Default for SimpleFrameCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl SimpleFrameCodec {
    /// 使用默认魔数与给定配置。
    pub fn new(config: CodecConfig) -> Self {
        Self {
            magic: SIMPLE_MAGIC,
            config,
        }
    }

    /// 替换魔数。
    #[must_use]
    pub fn with_magic(mut self, magic: [u8; 4]) -> Self {
        self.magic = magic;
        self
    }

    /// 当前魔数。
    pub fn magic(&self) -> [u8; 4] {
        self.magic
    }

    /// 帧编码后的总字节数。
    pub fn encoded_len(&self, frame: &SimpleFrame) -> usize {
        SIMPLE_HEADER_LEN + frame.payload_len()
    }

    /// 编码为独立的字节序列。
    pub fn encode(&self, frame: &SimpleFrame) -> Result<Bytes, EncodeError> {
        let len = self.config.length_field(frame.payload_len())?;
        let mut out = BytesMut::with_capacity(self.encoded_len(frame));
        out.put_slice(&self.magic);
        out.put_u16_le(frame.frame_type);
        out.put_u16_le(frame.sequence);
        out.put_u32_le(len);
        out.put_slice(&frame.payload);
        Ok(out.freeze())
    }

    /// 编码到 `buffer` 的 `offset` 处，返回写入字节数。
    ///
    /// 整帧放不下时返回 [`EncodeError::Buffer`]，缓冲不被修改。
    pub fn encode_into(
        &self,
        frame: &SimpleFrame,
        buffer: &mut ByteBuffer,
        offset: usize,
    ) -> Result<usize, EncodeError> {
        let len = self.config.length_field(frame.payload_len())?;
        let total = self.encoded_len(frame);
        buffer.span(offset, total)?;
        buffer.write_bytes(offset, &self.magic)?;
        buffer.write_u16(offset + 4, frame.frame_type)?;
        buffer.write_u16(offset + 6, frame.sequence)?;
        buffer.write_u32(offset + 8, len)?;
        buffer.write_bytes(offset + SIMPLE_HEADER_LEN, &frame.payload)?;
        Ok(total)
    }

    /// 解码恰好一帧。
    pub fn decode(&self, input: &[u8]) -> Result<SimpleFrame, DecodeError> {
        expect_magic(input, self.magic)?;
        if input.len() < SIMPLE_HEADER_LEN {
            return Err(DecodeError::Truncated {
                needed: SIMPLE_HEADER_LEN,
                actual: input.len(),
            });
        }
        let mut cursor = &input[4..];
        let frame_type = cursor.get_u16_le();
        let sequence = cursor.get_u16_le();
        let declared = cursor.get_u32_le() as usize;
        self.config.check_declared(declared)?;
        if cursor.remaining() != declared {
            warn!(
                declared,
                actual = cursor.remaining(),
                "simple frame length field disagrees with payload"
            );
            return Err(DecodeError::LengthMismatch {
                declared,
                actual: cursor.remaining(),
            });
        }
        Ok(SimpleFrame {
            frame_type,
            sequence,
            payload: Bytes::copy_from_slice(cursor),
        })
    }

    /// 从 `buffer` 的 `offset..offset + len` 解码一帧。
    pub fn decode_from(
        &self,
        buffer: &ByteBuffer,
        offset: usize,
        len: usize,
    ) -> Result<SimpleFrame, DecodeError> {
        self.decode(buffer.read_bytes(offset, len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn header_layout_is_little_endian() {
        let codec = SimpleFrameCodec::default();
        let bytes = codec
            .encode(&SimpleFrame::new(0x0102, 0x0304, &b"ab"[..]))
            .expect("编码失败");
        assert_eq!(
            &bytes[..],
            &[b'N', b'P', b'K', b'T', 0x02, 0x01, 0x04, 0x03, 2, 0, 0, 0, b'a', b'b']
        );
    }

    #[test]
    fn encode_into_rejects_short_target_untouched() {
        let codec = SimpleFrameCodec::default();
        let mut buffer = ByteBuffer::filled(16, 0xEE).expect("分配失败");
        let frame = SimpleFrame::new(1, 1, &b"12345"[..]);
        assert!(matches!(
            codec.encode_into(&frame, &mut buffer, 0),
            Err(EncodeError::Buffer(_))
        ));
        assert!(buffer.as_slice().iter().all(|&b| b == 0xEE));
    }

    #[traced_test]
    #[test]
    fn length_mismatch_is_logged() {
        let codec = SimpleFrameCodec::default();
        let mut bytes = codec
            .encode(&SimpleFrame::new(1, 2, &b"abc"[..]))
            .expect("编码失败")
            .to_vec();
        bytes.push(0);
        assert_eq!(
            codec.decode(&bytes),
            Err(DecodeError::LengthMismatch {
                declared: 3,
                actual: 4
            })
        );
        assert!(logs_contain("length field disagrees"));
    }
}
