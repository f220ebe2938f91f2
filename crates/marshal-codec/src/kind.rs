use tracing::warn;

use crate::addressed::{ADDRESSED_HEADER_LEN, ADDRESSED_MAGIC};
use crate::error::DecodeError;
use crate::simple::{SIMPLE_HEADER_LEN, SIMPLE_MAGIC};

/// 可按魔数识别的帧形状。
///
/// 校验和帧没有魔数，无法嗅探，需由调用方根据上下文选择 [`ChecksumCodec`](crate::ChecksumCodec)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// 简单帧，默认魔数 `NPKT`。
    Simple,
    /// 寻址消息，默认魔数 `NMSG`。
    Addressed,
}

impl FrameKind {
    /// 依据默认魔数识别完整帧；输入不足该形状的头部长度时返回 `None`。
    pub fn sniff(input: &[u8]) -> Option<FrameKind> {
        [FrameKind::Simple, FrameKind::Addressed]
            .into_iter()
            .find(|kind| input.len() >= kind.header_len() && input[..4] == kind.default_magic())
    }

    /// 该形状的默认魔数。
    pub const fn default_magic(self) -> [u8; 4] {
        match self {
            FrameKind::Simple => SIMPLE_MAGIC,
            FrameKind::Addressed => ADDRESSED_MAGIC,
        }
    }

    /// 头部长度（含魔数）。
    pub const fn header_len(self) -> usize {
        match self {
            FrameKind::Simple => SIMPLE_HEADER_LEN,
            FrameKind::Addressed => ADDRESSED_HEADER_LEN,
        }
    }
}

/// 在读取其它字段之前比较魔数。
pub(crate) fn expect_magic(input: &[u8], expected: [u8; 4]) -> Result<(), DecodeError> {
    let Some(head) = input.first_chunk::<4>() else {
        return Err(DecodeError::Truncated {
            needed: 4,
            actual: input.len(),
        });
    };
    if *head != expected {
        warn!(expected = ?expected, found = ?head, "rejecting frame with foreign magic");
        return Err(DecodeError::BadMagic {
            expected,
            found: *head,
        });
    }
    Ok(())
}
