use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use marshal_core::ByteBuffer;
use tracing::{debug, trace, warn};

use crate::config::PoolConfig;
use crate::error::{PoolError, Result};
use crate::pooled::{Abandoned, BlockId, PooledBuffer};
use crate::stats::PoolStats;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// `BufferPool` 以 LIFO 栈复用定长 [`ByteBuffer`]，并统计分配与复用次数。
///
/// # 模块角色（Why）
/// - 记录序列化、帧编码等路径反复需要同尺寸缓冲，池化后仅在可用栈为空时才真正分配；
/// - 借出块以 [`PooledBuffer`] 移交所有权，归还时按 [`BlockId`] 校验归属，
///   防止把其它池或清空前借出的块混入可用栈。
///
/// # 核心机制（How）
/// - `available: Vec<ByteBuffer>` 作为 LIFO 栈，`pop`/`push` 均为 O(1)，最近归还的块最先复用；
/// - `in_use: HashSet<BlockId>` 只记录身份，缓冲本体在借用方手中；
/// - 块序号 `next_seq` 单调递增，`clear` 也不回退；
/// - 未归还就被丢弃的块由租约登记到 `abandoned`，池在下次操作时把它们移出 `in_use`。
///
/// # 契约说明（What）
/// - **不变式**：`available.len() + in_use.len() == total_allocated`；
/// - **后置条件**：`acquire` 返回的块已清零；
/// - **线程模型**：本类型需要 `&mut self`，多线程共享请使用 [`SharedBufferPool`](crate::SharedBufferPool)。
///
/// # 设计权衡（Trade-offs）
/// - LIFO 偏向缓存局部性，不提供公平性或饥饿保证；
/// - 块从不单独收缩，只能通过 [`BufferPool::clear`] 整体丢弃。
#[derive(Debug)]
pub struct BufferPool {
    id: u64,
    block_size: usize,
    available: Vec<ByteBuffer>,
    in_use: HashSet<BlockId>,
    abandoned: Abandoned,
    next_seq: u64,
    total_allocated: usize,
    alloc_count: u64,
    reuse_count: u64,
}

impl BufferPool {
    /// 创建块大小为 `block_size` 的池，并预分配 `initial_blocks` 个块放入可用栈。
    pub fn new(block_size: usize, initial_blocks: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(PoolError::Config("block_size must be non-zero".into()));
        }
        let mut pool = Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            block_size,
            available: Vec::with_capacity(initial_blocks),
            in_use: HashSet::new(),
            abandoned: Abandoned::default(),
            next_seq: 0,
            total_allocated: 0,
            alloc_count: 0,
            reuse_count: 0,
        };
        for _ in 0..initial_blocks {
            let block = pool.allocate()?;
            pool.available.push(block);
        }
        debug!(pool = pool.id, block_size, initial_blocks, "buffer pool created");
        Ok(pool)
    }

    /// 按配置创建池。
    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.block_size, config.initial_blocks)
    }

    /// 每个块的字节数。
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// 借出一个清零的块。
    ///
    /// 可用栈非空时弹出栈顶并计一次复用，否则新分配并计入 `total_allocated`；
    /// 两种情况都计一次借出。
    pub fn acquire(&mut self) -> Result<PooledBuffer> {
        self.reclaim_abandoned();
        let buffer = match self.available.pop() {
            Some(mut buffer) => {
                buffer.zero_all();
                self.reuse_count += 1;
                trace!(pool = self.id, available = self.available.len(), "reusing pooled block");
                buffer
            }
            None => {
                let buffer = self.allocate()?;
                debug!(
                    pool = self.id,
                    total_allocated = self.total_allocated,
                    "allocating new block"
                );
                buffer
            }
        };
        let id = BlockId {
            pool: self.id,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.in_use.insert(id);
        self.alloc_count += 1;
        Ok(PooledBuffer::new(id, buffer, self.abandoned.clone()))
    }

    /// 归还借出的块，压回可用栈顶。
    ///
    /// 块不在借出集合中时返回 [`PoolError::NotOwnedByPool`]，本池计数不变；
    /// 该块随错误一起丢弃，并按遗弃处理通知其所属池。
    pub fn release(&mut self, buffer: PooledBuffer) -> Result<()> {
        self.reclaim_abandoned();
        let id = buffer.id();
        if !self.in_use.contains(&id) {
            warn!(pool = self.id, block = %id, "rejecting release of a block this pool does not track");
            return Err(PoolError::NotOwnedByPool { block: id });
        }
        let (id, buffer) = buffer.into_parts();
        self.in_use.remove(&id);
        self.available.push(buffer);
        trace!(pool = self.id, block = %id, available = self.available.len(), "block released");
        Ok(())
    }

    /// 当前统计快照。
    ///
    /// 已登记但尚未回收的遗弃块不计入 `in_use` 与 `total_allocated`。
    pub fn stats(&self) -> PoolStats {
        let pending = self
            .abandoned
            .lock()
            .iter()
            .filter(|id| self.in_use.contains(id))
            .count();
        PoolStats {
            block_size: self.block_size,
            total_allocated: self.total_allocated - pending,
            available: self.available.len(),
            in_use: self.in_use.len() - pending,
            alloc_count: self.alloc_count,
            reuse_count: self.reuse_count,
        }
    }

    /// 丢弃全部追踪：可用块立即释放，借出中的块此后归还会被拒绝。
    ///
    /// `total_allocated` 归零，累计计数 `alloc_count`/`reuse_count` 保留。
    pub fn clear(&mut self) {
        debug!(
            pool = self.id,
            dropped_available = self.available.len(),
            abandoned_in_use = self.in_use.len(),
            "clearing buffer pool"
        );
        self.available.clear();
        self.in_use.clear();
        self.abandoned.lock().clear();
        self.total_allocated = 0;
    }

    /// 把被丢弃块的身份移出借出集合；`clear` 之前借出的身份已不在集合中，直接忽略。
    fn reclaim_abandoned(&mut self) {
        let ids = core::mem::take(&mut *self.abandoned.lock());
        for id in ids {
            if self.in_use.remove(&id) {
                self.total_allocated -= 1;
                debug!(pool = self.id, block = %id, "reclaiming block dropped without release");
            }
        }
    }

    fn allocate(&mut self) -> Result<ByteBuffer> {
        let buffer = ByteBuffer::new(self.block_size)?;
        self.total_allocated += 1;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn zero_block_size_is_rejected() {
        assert!(matches!(BufferPool::new(0, 0), Err(PoolError::Config(_))));
    }

    #[test]
    fn lifo_hands_out_most_recent_release() {
        let mut pool = BufferPool::new(16, 0).expect("创建池失败");
        let mut first = pool.acquire().expect("借出失败");
        let mut second = pool.acquire().expect("借出失败");
        first.write_u8(0, 1).unwrap();
        second.write_u8(0, 2).unwrap();
        let first_ptr = first.as_slice().as_ptr();
        let second_ptr = second.as_slice().as_ptr();
        pool.release(first).unwrap();
        pool.release(second).unwrap();

        let next = pool.acquire().expect("借出失败");
        assert_eq!(next.as_slice().as_ptr(), second_ptr);
        assert_ne!(next.as_slice().as_ptr(), first_ptr);
        assert_eq!(next.read_u8(0).unwrap(), 0, "复用块必须清零");
    }

    #[test]
    fn clear_keeps_lifetime_counters() {
        let mut pool = BufferPool::new(8, 2).expect("创建池失败");
        let held = pool.acquire().expect("借出失败");
        pool.clear();
        let stats = pool.stats();
        assert_eq!((stats.total_allocated, stats.available, stats.in_use), (0, 0, 0));
        assert_eq!((stats.alloc_count, stats.reuse_count), (1, 1));
        assert!(matches!(
            pool.release(held),
            Err(PoolError::NotOwnedByPool { .. })
        ));
    }

    #[test]
    fn dropped_block_is_reclaimed() {
        let mut pool = BufferPool::new(64, 1).expect("创建池失败");
        for _ in 0..3 {
            drop(pool.acquire().expect("借出失败"));
        }
        let stats = pool.stats();
        assert_eq!((stats.total_allocated, stats.in_use, stats.available), (0, 0, 0));
        assert_eq!((stats.alloc_count, stats.reuse_count), (3, 1));
    }

    #[traced_test]
    #[test]
    fn lifecycle_is_traced() {
        let mut pool = BufferPool::new(32, 0).expect("创建池失败");
        let block = pool.acquire().expect("借出失败");
        let mut other = BufferPool::new(32, 0).expect("创建池失败");
        assert!(other.release(block).is_err());
        assert!(logs_contain("buffer pool created"));
        assert!(logs_contain("allocating new block"));
        assert!(logs_contain("rejecting release"));
    }
}
