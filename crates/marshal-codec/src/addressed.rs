use bytes::{Buf, BufMut, Bytes, BytesMut};
use marshal_core::ByteBuffer;
use tracing::{trace, warn};

use crate::config::CodecConfig;
use crate::error::{DecodeError, EncodeError};
use crate::kind::expect_magic;

/// 寻址消息默认魔数。
pub const ADDRESSED_MAGIC: [u8; 4] = *b"NMSG";

/// 寻址消息头部长度：`magic(4) | type(2) | sender(4) | receiver(4) | dataLen(4) | reserved(2)`。
pub const ADDRESSED_HEADER_LEN: usize = 20;

/// 带发送方与接收方编号的文本消息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedMessage {
    /// 消息类型。
    pub message_type: u16,
    /// 发送方编号。
    pub sender: u32,
    /// 接收方编号。
    pub receiver: u32,
    /// UTF-8 文本数据。
    pub data: String,
}

impl AddressedMessage {
    /// 构造消息。
    pub fn new(message_type: u16, sender: u32, receiver: u32, data: impl Into<String>) -> Self {
        Self {
            message_type,
            sender,
            receiver,
            data: data.into(),
        }
    }
}

/// 寻址消息编解码器。
///
/// 保留字段编码时恒为 0；解码时容忍非零值，仅记录 trace 事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressedCodec {
    magic: [u8; 4],
    config: CodecConfig,
}

impl Default for AddressedCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl AddressedCodec {
    /// 使用默认魔数与给定配置。
    pub fn new(config: CodecConfig) -> Self {
        Self {
            magic: ADDRESSED_MAGIC,
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

    /// 消息编码后的总字节数。
    pub fn encoded_len(&self, message: &AddressedMessage) -> usize {
        ADDRESSED_HEADER_LEN + message.data.len()
    }

    /// 编码为独立的字节序列。
    pub fn encode(&self, message: &AddressedMessage) -> Result<Bytes, EncodeError> {
        let len = self.config.length_field(message.data.len())?;
        let mut out = BytesMut::with_capacity(self.encoded_len(message));
        out.put_slice(&self.magic);
        out.put_u16_le(message.message_type);
        out.put_u32_le(message.sender);
        out.put_u32_le(message.receiver);
        out.put_u32_le(len);
        out.put_u16_le(0);
        out.put_slice(message.data.as_bytes());
        Ok(out.freeze())
    }

    /// 编码到 `buffer` 的 `offset` 处，返回写入字节数；放不下时缓冲不被修改。
    pub fn encode_into(
        &self,
        message: &AddressedMessage,
        buffer: &mut ByteBuffer,
        offset: usize,
    ) -> Result<usize, EncodeError> {
        let len = self.config.length_field(message.data.len())?;
        let total = self.encoded_len(message);
        buffer.span(offset, total)?;
        buffer.write_bytes(offset, &self.magic)?;
        buffer.write_u16(offset + 4, message.message_type)?;
        buffer.write_u32(offset + 6, message.sender)?;
        buffer.write_u32(offset + 10, message.receiver)?;
        buffer.write_u32(offset + 14, len)?;
        buffer.write_u16(offset + 18, 0)?;
        buffer.write_bytes(offset + ADDRESSED_HEADER_LEN, message.data.as_bytes())?;
        Ok(total)
    }

    /// 解码恰好一条消息。
    pub fn decode(&self, input: &[u8]) -> Result<AddressedMessage, DecodeError> {
        expect_magic(input, self.magic)?;
        if input.len() < ADDRESSED_HEADER_LEN {
            return Err(DecodeError::Truncated {
                needed: ADDRESSED_HEADER_LEN,
                actual: input.len(),
            });
        }
        let mut cursor = &input[4..];
        let message_type = cursor.get_u16_le();
        let sender = cursor.get_u32_le();
        let receiver = cursor.get_u32_le();
        let declared = cursor.get_u32_le() as usize;
        let reserved = cursor.get_u16_le();
        if reserved != 0 {
            trace!(reserved, "ignoring non-zero reserved field");
        }
        self.config.check_declared(declared)?;
        if cursor.remaining() != declared {
            warn!(
                declared,
                actual = cursor.remaining(),
                "addressed message length field disagrees with data"
            );
            return Err(DecodeError::LengthMismatch {
                declared,
                actual: cursor.remaining(),
            });
        }
        let data = core::str::from_utf8(cursor)
            .map_err(|_| DecodeError::InvalidUtf8)?
            .to_owned();
        Ok(AddressedMessage {
            message_type,
            sender,
            receiver,
            data,
        })
    }

    /// 从 `buffer` 的 `offset..offset + len` 解码一条消息。
    pub fn decode_from(
        &self,
        buffer: &ByteBuffer,
        offset: usize,
        len: usize,
    ) -> Result<AddressedMessage, DecodeError> {
        self.decode(buffer.read_bytes(offset, len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_offsets() {
        let codec = AddressedCodec::default();
        let bytes = codec
            .encode(&AddressedMessage::new(7, 0xAABBCCDD, 2, "hi"))
            .expect("编码失败");
        assert_eq!(bytes.len(), 22);
        assert_eq!(&bytes[..4], b"NMSG");
        assert_eq!(&bytes[4..6], &[7, 0]);
        assert_eq!(&bytes[6..10], &[0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(&bytes[14..18], &[2, 0, 0, 0]);
        assert_eq!(&bytes[18..20], &[0, 0]);
        assert_eq!(&bytes[20..], b"hi");
    }

    #[test]
    fn reserved_bytes_are_tolerated() {
        let codec = AddressedCodec::default();
        let mut bytes = codec
            .encode(&AddressedMessage::new(1, 1, 1, "x"))
            .expect("编码失败")
            .to_vec();
        bytes[18] = 0x5A;
        assert_eq!(codec.decode(&bytes).expect("解码失败").data, "x");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let codec = AddressedCodec::default();
        let mut bytes = codec
            .encode(&AddressedMessage::new(1, 1, 1, "ab"))
            .expect("编码失败")
            .to_vec();
        bytes[20] = 0xFF;
        assert_eq!(codec.decode(&bytes), Err(DecodeError::InvalidUtf8));
    }
}
