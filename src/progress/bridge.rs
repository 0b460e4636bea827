// 文件: progress/bridge.rs
// 作用: 把"已提交角度被改写"转换成一次定时过渡（动画描述符），
//       并把动画的开始/结束事件转交给帧同步协调器。
// 说明: 描述符之间互不取消；多个重叠过渡共享同一个时钟，呈现值取最近一次过渡。

use std::time::Duration;

use super::coordinator::FrameSyncCoordinator;
use super::State;
use crate::animation::{Animation, Clock};
use crate::config::TransitionConfig;
use crate::utils::id::IdCounter;

static DESCRIPTOR_IDS: IdCounter = IdCounter::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u64);

impl DescriptorId {
    fn next() -> Self {
        Self(DESCRIPTOR_IDS.next())
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// One in-flight timed transition of the progress angle.
///
/// Immutable once created; equality is by identity.
#[derive(Debug, Clone)]
pub struct AnimationDescriptor {
    id: DescriptorId,
    animation: Animation,
}

impl AnimationDescriptor {
    pub fn new(animation: Animation) -> Self {
        Self {
            id: DescriptorId::next(),
            animation,
        }
    }

    pub fn id(&self) -> DescriptorId {
        self.id
    }

    pub fn start_value(&self) -> f64 {
        self.animation.from()
    }

    pub fn end_value(&self) -> f64 {
        self.animation.to()
    }

    pub fn duration(&self) -> Duration {
        self.animation.duration()
    }

    pub fn start_timestamp(&self) -> Duration {
        self.animation.start_time()
    }

    /// Interpolated angle `elapsed` after the transition started.
    pub fn sample(&self, elapsed: Duration) -> f64 {
        self.animation
            .value_at(self.animation.start_time().saturating_add(elapsed))
    }

    /// Interpolated angle at the clock's current time.
    pub fn value(&self) -> f64 {
        self.animation.value()
    }

    pub fn is_done(&self) -> bool {
        self.animation.is_done()
    }
}

impl PartialEq for AnimationDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AnimationDescriptor {}

/// Lifecycle signal emitted by the progress layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationEvent {
    Started(AnimationDescriptor),
    /// `completed` is false when the transition was cleared before its duration elapsed.
    Stopped {
        descriptor: AnimationDescriptor,
        completed: bool,
    },
}

/// Builds angle transitions and relays their lifecycle to the coordinator.
#[derive(Debug, Clone)]
pub struct AnimationEventBridge {
    clock: Clock,
    config: TransitionConfig,
}

impl AnimationEventBridge {
    pub fn new(clock: Clock, config: TransitionConfig) -> Self {
        Self { clock, config }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn config(&self) -> TransitionConfig {
        self.config
    }

    /// Transition for an angle write from the presented value `from` to the committed `to`.
    pub fn action_for_angle(&self, from: f64, to: f64) -> AnimationDescriptor {
        let animation = Animation::new(self.clock.clone(), from, to, self.config);
        AnimationDescriptor::new(animation)
    }

    /// Forwards `event` to `coordinator` together with the indicator's logical state.
    ///
    /// The coordinator decides whether a start registers frame sampling.
    pub fn relay(
        &self,
        event: AnimationEvent,
        state: &State,
        coordinator: &mut FrameSyncCoordinator,
        regenerate: impl FnOnce(f64),
    ) {
        match event {
            AnimationEvent::Started(descriptor) => {
                coordinator.on_animation_started(descriptor, state)
            }
            AnimationEvent::Stopped {
                descriptor,
                completed,
            } => coordinator.on_animation_finished(&descriptor, completed, regenerate),
        }
    }
}
