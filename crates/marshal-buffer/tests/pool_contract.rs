//! `pool_contract` 集成测试：从公开 API 视角验证 `BufferPool` 的借还与统计契约。
//!
//! # 测试目标（Why）
//! - 守住“块只在可用栈或借出集合之一”的守恒关系，任何借还（含直接丢弃）序列后都成立；
//! - 确认复用计数、清零、归属校验三项行为在重构后保持不变。
//!
//! # 结构安排（How）
//! - `preallocated_pool_scenario`：预分配 5 块的典型借还流程；
//! - `conservation_holds_for_any_sequence`：proptest 随机借还序列；
//! - 其余用例覆盖清零、跨池归还、`clear` 后归还与多线程共享。

use std::thread;

use marshal_buffer::{BufferPool, PoolConfig, PoolError, SharedBufferPool};
use marshal_core::records::Rectangle;
use proptest::prelude::*;

/// 预分配 5 块、借出 10 块、归还 5 块、再借 5 块。
///
/// # 契约校验（What）
/// - 借出 10 块后 `total_allocated = 10`、`in_use = 10`、`available = 0`；
/// - 最后 5 次借出全部来自可用栈：`reuse_count` 恰好增加 5，`total_allocated` 不变。
#[test]
fn preallocated_pool_scenario() {
    let mut pool = BufferPool::new(1024, 5).expect("创建池失败");
    assert_eq!(pool.stats().available, 5);

    let mut held: Vec<_> = (0..10).map(|_| pool.acquire().expect("借出失败")).collect();
    let stats = pool.stats();
    assert_eq!(
        (stats.total_allocated, stats.in_use, stats.available),
        (10, 10, 0)
    );

    for block in held.drain(..5) {
        pool.release(block).expect("归还失败");
    }
    let stats = pool.stats();
    assert_eq!((stats.in_use, stats.available), (5, 5));
    let reuse_before = stats.reuse_count;

    held.extend((0..5).map(|_| pool.acquire().expect("借出失败")));
    let stats = pool.stats();
    assert_eq!(stats.total_allocated, 10);
    assert_eq!(stats.reuse_count - reuse_before, 5);
    assert_eq!(stats.alloc_count, 15);
    assert_eq!(stats.available, 0);
}

#[test]
fn released_contents_never_leak_into_next_acquire() {
    let mut pool = BufferPool::new(64, 0).expect("创建池失败");
    let mut block = pool.acquire().expect("借出失败");
    block.fill(0, 64, 0xAA).unwrap();
    pool.release(block).unwrap();

    let again = pool.acquire().expect("借出失败");
    assert!(again.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn foreign_block_is_rejected_and_counts_stay() {
    let mut left = BufferPool::new(32, 0).expect("创建池失败");
    let mut right = BufferPool::new(32, 0).expect("创建池失败");
    let block = left.acquire().expect("借出失败");
    let id = block.id();

    let before = right.stats();
    match right.release(block) {
        Err(PoolError::NotOwnedByPool { block }) => assert_eq!(block, id),
        other => panic!("跨池归还必须被拒绝：{other:?}"),
    }
    assert_eq!(right.stats(), before);
    let left_stats = left.stats();
    assert_eq!(
        (left_stats.in_use, left_stats.total_allocated),
        (0, 0),
        "被拒绝的块随错误丢弃，所属池不再计为借出"
    );
}

/// 借出后直接丢弃：块离开借出集合，守恒关系保持，借出集合不会只增不减。
#[test]
fn dropping_without_release_frees_the_slot() {
    let mut pool = BufferPool::new(64, 1).expect("创建池失败");
    for _ in 0..3 {
        let block = pool.acquire().expect("借出失败");
        drop(block);
    }
    let stats = pool.stats();
    assert_eq!(
        (stats.total_allocated, stats.in_use, stats.available),
        (0, 0, 0)
    );

    let kept = pool.acquire().expect("借出失败");
    let stats = pool.stats();
    assert_eq!((stats.total_allocated, stats.in_use), (1, 1));
    pool.release(kept).expect("归还失败");
    assert_eq!(pool.stats().available, 1);
}

#[test]
fn blocks_from_before_clear_are_rejected() {
    let mut pool = BufferPool::new(32, 0).expect("创建池失败");
    let stale = pool.acquire().expect("借出失败");
    pool.clear();
    let fresh = pool.acquire().expect("借出失败");
    assert_ne!(stale.id(), fresh.id());
    assert!(matches!(
        pool.release(stale),
        Err(PoolError::NotOwnedByPool { .. })
    ));
    pool.release(fresh).expect("清空后借出的块可以归还");
}

#[test]
fn pooled_block_backs_a_record_view() {
    let mut pool = BufferPool::new(16, 1).expect("创建池失败");
    let mut block = pool.acquire().expect("借出失败");
    {
        let mut rect = Rectangle::new(&mut *block).expect("视图构造失败");
        rect.set_width(6).unwrap();
        rect.set_height(7).unwrap();
        assert_eq!(rect.area().unwrap(), 42);
    }
    let rect = Rectangle::new(&*block).expect("视图构造失败");
    assert_eq!(rect.width().unwrap(), 6);
    pool.release(block).unwrap();
}

#[test]
fn pool_from_toml_config() {
    let config = PoolConfig::from_toml_str("block_size = 256\ninitial_blocks = 3").expect("解析失败");
    let pool = BufferPool::from_config(&config).expect("创建池失败");
    let stats = pool.stats();
    assert_eq!((stats.block_size, stats.available, stats.total_allocated), (256, 3, 3));
}

#[test]
fn shared_pool_survives_concurrent_churn() {
    let pool = SharedBufferPool::new(128, 4).expect("创建池失败");
    let workers: Vec<_> = (0..4u8)
        .map(|worker| {
            let pool = pool.clone();
            thread::spawn(move || {
                for round in 0..100u8 {
                    let mut block = pool.acquire().expect("借出失败");
                    assert_eq!(block.read_u8(0).unwrap(), 0);
                    block.write_u8(0, (worker ^ round) | 1).unwrap();
                    pool.release(block).expect("归还失败");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("工作线程异常退出");
    }

    let stats = pool.stats();
    assert_eq!(stats.in_use, 0);
    assert_eq!(stats.available, stats.total_allocated);
    assert_eq!(stats.alloc_count, 400);
    assert_eq!(stats.total_allocated, 4, "并发借出数不超过预分配数，不应触发新分配");
}

#[derive(Debug, Clone)]
enum Step {
    Acquire,
    Release(usize),
    Abandon(usize),
    Clear,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => Just(Step::Acquire),
        4 => any::<usize>().prop_map(Step::Release),
        2 => any::<usize>().prop_map(Step::Abandon),
        1 => Just(Step::Clear),
    ]
}

proptest! {
    /// 任意借还序列之后：`available + in_use == total_allocated`，且借出计数与模型一致。
    #[test]
    fn conservation_holds_for_any_sequence(initial in 0usize..4, steps in proptest::collection::vec(step(), 0..64)) {
        let mut pool = BufferPool::new(8, initial).expect("创建池失败");
        let mut held = Vec::new();
        let mut acquired = 0u64;
        for step in steps {
            match step {
                Step::Acquire => {
                    held.push(pool.acquire().expect("借出失败"));
                    acquired += 1;
                }
                Step::Release(pick) if !held.is_empty() => {
                    let block = held.swap_remove(pick % held.len());
                    pool.release(block).expect("归还失败");
                }
                Step::Abandon(pick) if !held.is_empty() => {
                    drop(held.swap_remove(pick % held.len()));
                }
                Step::Release(_) | Step::Abandon(_) => {}
                Step::Clear => {
                    pool.clear();
                    held.clear();
                }
            }
            let stats = pool.stats();
            prop_assert_eq!(stats.available + stats.in_use, stats.total_allocated);
            prop_assert_eq!(stats.in_use, held.len());
            prop_assert_eq!(stats.alloc_count, acquired);
            prop_assert!(stats.reuse_count <= stats.alloc_count);
        }
    }

    /// 借 N 还 M 再借 M：复用数恰好增加 M，总分配数不变。
    #[test]
    fn reacquiring_released_blocks_is_pure_reuse(n in 1usize..32, m_seed in any::<usize>()) {
        let m = m_seed % (n + 1);
        let mut pool = BufferPool::new(16, 0).expect("创建池失败");
        let mut held: Vec<_> = (0..n).map(|_| pool.acquire().expect("借出失败")).collect();
        for block in held.drain(..m) {
            pool.release(block).expect("归还失败");
        }
        let before = pool.stats();
        held.extend((0..m).map(|_| pool.acquire().expect("借出失败")));
        let after = pool.stats();
        prop_assert_eq!(after.reuse_count - before.reuse_count, m as u64);
        prop_assert_eq!(after.total_allocated, before.total_allocated);
    }
}
