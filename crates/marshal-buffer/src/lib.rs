//! `marshal-buffer` 提供定长块的 LIFO 复用缓冲池。
//!
//! # 模块定位（Why）
//! - 结构序列化与帧编码会反复申请同尺寸的 [`ByteBuffer`](marshal_core::ByteBuffer)，
//!   缓冲池把“分配一次、反复借还”固化为显式 API，并统计复用率供展示层观察；
//! - 借出的块以 [`PooledBuffer`] 形式移交所有权，归还时依据 [`BlockId`] 校验归属。
//!
//! # 设计概要（How）
//! - `pool`：单线程 [`BufferPool`]，可用块以 `Vec` 作为 LIFO 栈，借出块记录在 `HashSet<BlockId>`；
//! - `shared`：[`SharedBufferPool`] 以 `Arc<spin::Mutex<_>>` 包装，供多线程借还；
//! - `stats`/`config`：可序列化的统计快照与 TOML 配置；
//! - `error`：[`PoolError`] 及稳定错误码。
//!
//! # 契约（What）
//! - 任意时刻 `available + in_use == total_allocated`；
//! - 每次借出的块都已清零；
//! - 复用策略为 LIFO：最近归还的块最先借出，不承诺公平性。

mod config;
mod error;
mod pool;
mod pooled;
mod shared;
mod stats;

pub use config::PoolConfig;
pub use error::{PoolError, Result, codes};
pub use pool::BufferPool;
pub use pooled::{BlockId, PooledBuffer};
pub use shared::SharedBufferPool;
pub use stats::PoolStats;
