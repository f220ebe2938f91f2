use core::fmt;
use core::ops::{Deref, DerefMut};
use std::sync::Arc;

use marshal_core::ByteBuffer;
use spin::Mutex;

/// 借出后未经 `release` 就被丢弃的块身份，由池在下次操作时回收。
pub(crate) type Abandoned = Arc<Mutex<Vec<BlockId>>>;

/// 借出块的身份：所属池编号 + 池内序号。
///
/// 序号在池的整个生命周期内单调递增，`clear` 之后也不会复用，
/// 因此清空前借出的块无法被误认为新块。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    pub(crate) pool: u64,
    pub(crate) seq: u64,
}

impl BlockId {
    /// 所属池编号。
    pub fn pool(&self) -> u64 {
        self.pool
    }

    /// 池内序号。
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool{}#{}", self.pool, self.seq)
    }
}

/// 从 [`BufferPool`](crate::BufferPool) 借出的缓冲。
///
/// # 契约说明（What）
/// - 通过 `Deref`/`DerefMut` 直接当作 [`ByteBuffer`] 使用，也可作为 `StructView` 的底座；
/// - 应显式交还给 [`BufferPool::release`](crate::BufferPool::release) 以便复用内存；
/// - 直接丢弃时内存随之释放，租约把块身份登记到池的遗弃队列，
///   池在下一次 `acquire`/`release`/`stats`/`clear` 时将其移出借出集合并扣减 `total_allocated`。
#[must_use = "未归还的块只会被释放，不会回到可用栈"]
#[derive(Debug)]
pub struct PooledBuffer {
    buffer: ByteBuffer,
    lease: Lease,
}

impl PooledBuffer {
    pub(crate) fn new(id: BlockId, buffer: ByteBuffer, abandoned: Abandoned) -> Self {
        Self {
            buffer,
            lease: Lease {
                id,
                abandoned: Some(abandoned),
            },
        }
    }

    /// 拆出身份与缓冲，租约随之解除，不再登记遗弃。
    pub(crate) fn into_parts(self) -> (BlockId, ByteBuffer) {
        let PooledBuffer { buffer, mut lease } = self;
        lease.abandoned = None;
        (lease.id, buffer)
    }

    /// 块身份。
    pub fn id(&self) -> BlockId {
        self.lease.id
    }
}

/// 租约：在 `Drop` 时把仍未归还的块身份报告给所属池。
#[derive(Debug)]
struct Lease {
    id: BlockId,
    abandoned: Option<Abandoned>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        if let Some(abandoned) = self.abandoned.take() {
            abandoned.lock().push(self.id);
        }
    }
}

impl Deref for PooledBuffer {
    type Target = ByteBuffer;

    fn deref(&self) -> &ByteBuffer {
        &self.buffer
    }
}

impl DerefMut for PooledBuffer {
    fn deref_mut(&mut self) -> &mut ByteBuffer {
        &mut self.buffer
    }
}
