use marshal_core::MarshalError;
use thiserror::Error;

use crate::pooled::BlockId;

/// 本 crate 的 `Result` 别名。
pub type Result<T, E = PoolError> = core::result::Result<T, E>;

/// 缓冲池错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：区分“归还了不属于本池的块”“底层缓冲分配失败”“配置非法”三类问题；
/// - **契约 (What)**：`NotOwnedByPool` 出现时，被拒绝的块已随错误一起丢弃，池内计数不变；
/// - **设计权衡 (Trade-offs)**：`Config` 仅携带渲染后的消息，避免把 `toml` 的错误类型泄漏到公开 API。
#[derive(Debug, Error)]
pub enum PoolError {
    /// 块不在本池的借出集合中（来自其它池，或在 `clear` 之前借出）。
    #[error("block {block} is not currently lent out by this pool")]
    NotOwnedByPool { block: BlockId },

    /// 底层缓冲操作失败。
    #[error(transparent)]
    Marshal(#[from] MarshalError),

    /// 配置无法解析或取值非法。
    #[error("invalid pool configuration: {0}")]
    Config(String),
}

impl PoolError {
    /// 稳定错误码；底层错误沿用 `marshal-core` 的码值。
    pub fn code(&self) -> &'static str {
        match self {
            PoolError::NotOwnedByPool { .. } => codes::POOL_NOT_OWNED,
            PoolError::Marshal(inner) => inner.code(),
            PoolError::Config(_) => codes::POOL_CONFIG,
        }
    }
}

/// 缓冲池错误码。
pub mod codes {
    /// 归还的块不属于本池。
    pub const POOL_NOT_OWNED: &str = "pool.not_owned";
    /// 配置非法。
    pub const POOL_CONFIG: &str = "pool.config";
}
