use std::sync::Arc;

use spin::Mutex;

use crate::config::PoolConfig;
use crate::error::Result;
use crate::pool::BufferPool;
use crate::pooled::PooledBuffer;
use crate::stats::PoolStats;

/// 可跨线程共享的 [`BufferPool`]。
///
/// # 设计背景（Why）
/// - 借还操作只涉及栈与集合的常数时间更新，临界区极短，自旋锁即可满足；
/// - 缓冲内容归借用方独占，读写无需额外加锁。
///
/// # 契约说明（What）
/// - `acquire`/`release`/`stats`/`clear` 彼此互斥；
/// - 克隆得到的句柄指向同一个池。
#[derive(Debug, Clone)]
pub struct SharedBufferPool {
    inner: Arc<Mutex<BufferPool>>,
}

impl SharedBufferPool {
    /// 参数同 [`BufferPool::new`]。
    pub fn new(block_size: usize, initial_blocks: usize) -> Result<Self> {
        BufferPool::new(block_size, initial_blocks).map(Self::from)
    }

    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        BufferPool::from_config(config).map(Self::from)
    }

    pub fn acquire(&self) -> Result<PooledBuffer> {
        self.inner.lock().acquire()
    }

    pub fn release(&self, buffer: PooledBuffer) -> Result<()> {
        self.inner.lock().release(buffer)
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}

impl From<BufferPool> for SharedBufferPool {
    fn from(pool: BufferPool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }
}
