#![warn(missing_docs)]

//! # marshal-codec
//!
//! ## 教案目的（Why）
//! - **定位**：把负载封装为自描述的二进制帧，并在解码时校验魔数、长度与校验和；
//! - **架构角色**：位于 `marshal-core` 之上，既可输出独立的 [`Bytes`](bytes::Bytes)，
//!   也可直接写入池化的 [`ByteBuffer`](marshal_core::ByteBuffer)；
//! - **设计策略**：三种帧形状共享“定长头部 + 由负载推导的长度字段 + 负载”的模式，
//!   长度字段永远在编码时计算，调用方无法写入不一致的长度。
//!
//! ## 交互契约（What）
//! - [`SimpleFrameCodec`]：`magic(4) | type(2) | sequence(2) | payloadLen(4) | payload`；
//! - [`ChecksumCodec`]：`dataLen(4) | data | checksum(4)`，校验和为 [`additive_checksum`]；
//! - [`AddressedCodec`]：`magic(4) | type(2) | sender(4) | receiver(4) | dataLen(4) | reserved(2) | data`；
//! - 所有整数均为小端序；
//! - [`FrameKind::sniff`] 依据魔数识别完整帧的形状。
//!
//! ## 实现策略（How）
//! - 编码使用 `bytes::BytesMut` + `BufMut` 的小端写入，解码使用 `Buf` 游标按序读取；
//! - 魔数在读取其它任何字段之前比较，不匹配立即返回 [`DecodeError::BadMagic`]；
//! - 负载上限由 [`CodecConfig::max_payload_len`] 控制，编码与解码两侧一致执行。
//!
//! ## 风险提示（Trade-offs）
//! - 加性校验和只能发现单字节改动与多数随机损坏，无法发现字节交换，不适合作为完整性保证；
//! - 不支持流式拆帧：输入必须恰好是一帧。

mod addressed;
mod checked;
mod checksum;
mod config;
mod error;
mod kind;
mod simple;

pub use addressed::{ADDRESSED_HEADER_LEN, ADDRESSED_MAGIC, AddressedCodec, AddressedMessage};
pub use checked::{CHECKED_OVERHEAD, CheckedFrame, ChecksumCodec, ChecksummedFrame};
pub use checksum::additive_checksum;
pub use config::CodecConfig;
pub use error::{ConfigError, DecodeError, EncodeError, codes};
pub use kind::FrameKind;
pub use simple::{SIMPLE_HEADER_LEN, SIMPLE_MAGIC, SimpleFrame, SimpleFrameCodec};
