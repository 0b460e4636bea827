// 文件: utils/id.rs
// 作用: 提供ID生成器，用于分配进程内唯一的标识符
// 应用场景:
//   - 进度指示器实例ID（帧回调的投递目标）
//   - 动画描述符ID（区分重叠的过渡动画）
//   - 帧回调注册ID

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter that returns unique IDs.
pub struct IdCounter {
    value: AtomicU64,
}

impl IdCounter {
    pub const fn new() -> Self {
        Self {
            // 从1开始，0不会作为有效ID出现
            value: AtomicU64::new(1),
        }
    }

    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_from_one() {
        let counter = IdCounter::new();
        assert_eq!(counter.next(), 1);
        assert_eq!(counter.next(), 2);
        assert_eq!(counter.next(), 3);
    }
}
