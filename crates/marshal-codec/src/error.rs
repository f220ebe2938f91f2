use marshal_core::MarshalError;
use thiserror::Error;

/// 帧解码错误。
///
/// # 教案式说明
/// - **意图 (Why)**：把“不是这种帧”（魔数）、“帧不完整”（截断）、“头部自相矛盾”（长度）
///   与“内容非法”（UTF-8）区分开，调用方可据此决定丢弃还是上报；
/// - **契约 (What)**：校验和不匹配不是错误，而是 [`CheckedFrame::valid`](crate::CheckedFrame) 上的数据。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// 魔数与期望不符，未读取任何其它字段。
    #[error("bad magic: expected {expected:02x?}, found {found:02x?}")]
    BadMagic {
        /// 期望的魔数。
        expected: [u8; 4],
        /// 输入中的前 4 字节。
        found: [u8; 4],
    },

    /// 输入短于该帧形状的最小长度。
    #[error("frame truncated: need at least {needed} bytes, got {actual}")]
    Truncated {
        /// 最小长度。
        needed: usize,
        /// 实际长度。
        actual: usize,
    },

    /// 头部声明的负载长度与实际字节数不符。
    #[error("declared payload length {declared} does not match the {actual} bytes present")]
    LengthMismatch {
        /// 头部声明值。
        declared: usize,
        /// 头部之后的实际字节数。
        actual: usize,
    },

    /// 寻址消息的数据不是合法 UTF-8。
    #[error("message data is not valid UTF-8")]
    InvalidUtf8,

    /// 负载长度超过配置上限。
    #[error("payload of {len} bytes exceeds the limit of {limit}")]
    PayloadTooLarge {
        /// 负载长度。
        len: usize,
        /// 配置上限。
        limit: usize,
    },

    /// 从缓冲读取帧字节时越界。
    #[error(transparent)]
    Buffer(#[from] MarshalError),
}

/// 帧编码错误。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// 负载长度超过配置上限或 32 位长度字段。
    #[error("payload of {len} bytes exceeds the limit of {limit}")]
    PayloadTooLarge {
        /// 负载长度。
        len: usize,
        /// 生效的上限。
        limit: usize,
    },

    /// 目标缓冲容纳不下整帧；此时目标缓冲未被修改。
    #[error(transparent)]
    Buffer(#[from] MarshalError),
}

/// 编解码配置无法解析或取值非法。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid codec configuration: {0}")]
pub struct ConfigError(pub(crate) String);

impl DecodeError {
    /// 稳定错误码；缓冲错误沿用 `marshal-core` 的码值。
    pub fn code(&self) -> &'static str {
        match self {
            DecodeError::BadMagic { .. } => codes::CODEC_BAD_MAGIC,
            DecodeError::Truncated { .. } => codes::CODEC_TRUNCATED,
            DecodeError::LengthMismatch { .. } => codes::CODEC_LENGTH_MISMATCH,
            DecodeError::InvalidUtf8 => codes::CODEC_INVALID_UTF8,
            DecodeError::PayloadTooLarge { .. } => codes::CODEC_PAYLOAD_TOO_LARGE,
            DecodeError::Buffer(inner) => inner.code(),
        }
    }
}

impl EncodeError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::PayloadTooLarge { .. } => codes::CODEC_PAYLOAD_TOO_LARGE,
            EncodeError::Buffer(inner) => inner.code(),
        }
    }
}

/// 编解码错误码，遵循 `<领域>.<语义>`。
pub mod codes {
    /// 魔数不匹配。
    pub const CODEC_BAD_MAGIC: &str = "codec.bad_magic";
    /// 输入截断。
    pub const CODEC_TRUNCATED: &str = "codec.truncated";
    /// 长度字段与实际不符。
    pub const CODEC_LENGTH_MISMATCH: &str = "codec.length_mismatch";
    /// 文本不是 UTF-8。
    pub const CODEC_INVALID_UTF8: &str = "codec.invalid_utf8";
    /// 负载超限。
    pub const CODEC_PAYLOAD_TOO_LARGE: &str = "codec.payload_too_large";
    /// 配置非法。
    pub const CODEC_CONFIG: &str = "codec.config";
}

impl ConfigError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        codes::CODEC_CONFIG
    }
}
