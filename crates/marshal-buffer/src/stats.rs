use serde::Serialize;

/// 缓冲池统计快照。
///
/// 字段语义：
/// - `total_allocated`：当前追踪的块总数，等于 `available + in_use`；
/// - `alloc_count`：累计借出次数，`clear` 后保留；
/// - `reuse_count`：累计从可用栈弹出的次数，`clear` 后保留。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub block_size: usize,
    pub total_allocated: usize,
    pub available: usize,
    pub in_use: usize,
    pub alloc_count: u64,
    pub reuse_count: u64,
}

impl PoolStats {
    /// `reuse_count / alloc_count`，尚未借出过时为 `0.0`。
    pub fn reuse_rate(&self) -> f64 {
        if self.alloc_count == 0 {
            0.0
        } else {
            self.reuse_count as f64 / self.alloc_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuse_rate_handles_empty_pool() {
        let stats = PoolStats {
            block_size: 64,
            total_allocated: 0,
            available: 0,
            in_use: 0,
            alloc_count: 0,
            reuse_count: 0,
        };
        assert_eq!(stats.reuse_rate(), 0.0);
        let busy = PoolStats {
            alloc_count: 8,
            reuse_count: 6,
            ..stats
        };
        assert_eq!(busy.reuse_rate(), 0.75);
    }

    #[test]
    fn snapshot_serializes_with_field_names() {
        let stats = PoolStats {
            block_size: 1024,
            total_allocated: 3,
            available: 1,
            in_use: 2,
            alloc_count: 5,
            reuse_count: 2,
        };
        let json = serde_json::to_value(stats).expect("序列化失败");
        assert_eq!(json["block_size"], 1024);
        assert_eq!(json["in_use"], 2);
        assert_eq!(json["reuse_count"], 2);
    }
}
