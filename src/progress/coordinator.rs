// 文件: progress/coordinator.rs
// 作用: 帧同步协调器，维护 Idle / Sampling 状态机，按需注册和释放逐帧回调。
// 不变量: 逐帧回调存在 当且仅当 活动描述符集合非空。
//         两者放在同一个枚举变体中，不存在单独可设置的标志位。

use std::mem;

use super::bridge::AnimationDescriptor;
use super::State;
use crate::frame::{FrameCallback, FrameScheduler, IndicatorId};

/// Sampling state of a [`FrameSyncCoordinator`].
#[derive(Debug, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Sampling {
        /// Never empty.
        animations: Vec<AnimationDescriptor>,
        callback: FrameCallback,
    },
}

impl AnimationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, AnimationState::Idle)
    }

    pub fn animations(&self) -> &[AnimationDescriptor] {
        match self {
            AnimationState::Idle => &[],
            AnimationState::Sampling { animations, .. } => animations,
        }
    }

    pub fn callback(&self) -> Option<&FrameCallback> {
        match self {
            AnimationState::Idle => None,
            AnimationState::Sampling { callback, .. } => Some(callback),
        }
    }
}

/// Keeps a per-frame callback registered while any angle transition is live.
pub struct FrameSyncCoordinator {
    target: IndicatorId,
    scheduler: Box<dyn FrameScheduler>,
    state: AnimationState,
}

impl FrameSyncCoordinator {
    pub fn new(target: IndicatorId, scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            target,
            scheduler,
            state: AnimationState::Idle,
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_sampling(&self) -> bool {
        !self.state.is_idle()
    }

    pub fn active_animations(&self) -> &[AnimationDescriptor] {
        self.state.animations()
    }

    pub fn has_frame_callback(&self) -> bool {
        self.state.callback().is_some()
    }

    pub fn on_animation_started(&mut self, descriptor: AnimationDescriptor, state: &State) {
        if state.is_indeterminate() {
            debug!(
                id = descriptor.id().get(),
                "ignoring transition start while indeterminate"
            );
            return;
        }

        match &mut self.state {
            AnimationState::Idle => {
                let callback = self.scheduler.register(self.target);
                debug!(
                    indicator = self.target.get(),
                    callback = callback.id(),
                    "idle -> sampling"
                );
                self.state = AnimationState::Sampling {
                    animations: vec![descriptor],
                    callback,
                };
            }
            AnimationState::Sampling { animations, .. } => {
                if animations.contains(&descriptor) {
                    warn!(id = descriptor.id().get(), "transition started twice");
                    return;
                }
                animations.push(descriptor);
                trace!(active = animations.len(), "joined sampling");
            }
        }
    }

    /// Removes `descriptor` from the active set.
    ///
    /// When the set empties, `regenerate` runs once with the descriptor's end angle and the frame
    /// callback is released in the same step.
    pub fn on_animation_finished(
        &mut self,
        descriptor: &AnimationDescriptor,
        completed: bool,
        regenerate: impl FnOnce(f64),
    ) {
        let AnimationState::Sampling { animations, .. } = &mut self.state else {
            debug!(
                id = descriptor.id().get(),
                "transition finished while idle"
            );
            return;
        };

        let Some(idx) = animations.iter().position(|a| a == descriptor) else {
            // 指示不确定状态时被忽略的过渡
            trace!(id = descriptor.id().get(), "finished transition was not tracked");
            return;
        };
        animations.remove(idx);

        if !animations.is_empty() {
            trace!(active = animations.len(), completed, "transition finished");
            return;
        }

        // 移除最后一个描述符、最终重绘和释放回调在同一步内完成
        if let AnimationState::Sampling { callback, .. } =
            mem::replace(&mut self.state, AnimationState::Idle)
        {
            regenerate(descriptor.end_value());
            debug!(
                indicator = self.target.get(),
                callback = callback.id(),
                completed,
                "sampling -> idle"
            );
            self.scheduler.release(callback);
        }
    }

    /// Releases the frame callback if one is registered.
    pub fn teardown(&mut self) {
        if let AnimationState::Sampling { callback, .. } =
            mem::replace(&mut self.state, AnimationState::Idle)
        {
            debug!(indicator = self.target.get(), "releasing frame callback on teardown");
            self.scheduler.release(callback);
        }
    }
}

impl Drop for FrameSyncCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for FrameSyncCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSyncCoordinator")
            .field("target", &self.target)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
