// 文件: progress/layer.rs
// 作用: 进度图层，持有已提交的进度值与派生角度，以及正在进行的角度过渡。
// 关键概念:
//   - 已提交值 (committed): 最终目标角度，立即生效
//   - 呈现值 (presented): 过渡动画当前插值得到的角度，逐帧采样
//   - 无动画提交时清除所有过渡残留，保证下一次动画从正确的起点开始

use super::bridge::{AnimationDescriptor, AnimationEvent, AnimationEventBridge};
use super::fraction::FractionCompleted;
use crate::render::ShapeLayer;

/// Progress shape layer with an animatable angle.
#[derive(Debug)]
pub struct ProgressLayer {
    pub shape: ShapeLayer,
    progress: FractionCompleted,
    angle: f64,
    /// In-flight transitions, oldest first.
    transitions: Vec<AnimationDescriptor>,
}

impl ProgressLayer {
    pub fn new() -> Self {
        Self {
            shape: ShapeLayer::rotated_to_twelve_oclock(),
            progress: FractionCompleted::ZERO,
            angle: 0.,
            transitions: Vec::new(),
        }
    }

    pub fn progress(&self) -> FractionCompleted {
        self.progress
    }

    /// The committed angle, `progress * 2π`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn transitions(&self) -> &[AnimationDescriptor] {
        &self.transitions
    }

    /// Angle currently on screen.
    ///
    /// Reads the most recent transition; with none in flight this is the committed angle.
    pub fn presented_angle(&self) -> f64 {
        match self.transitions.last() {
            Some(transition) => transition.value(),
            None => self.angle,
        }
    }

    /// Commits `progress`.
    ///
    /// With a `bridge` the write becomes a transition from the presented angle, returned as a
    /// [`AnimationEvent::Started`]. Without one the angle is applied immediately and every
    /// in-flight transition is cleared, reported as uncompleted stops.
    pub fn set_progress(
        &mut self,
        progress: FractionCompleted,
        bridge: Option<&AnimationEventBridge>,
    ) -> Vec<AnimationEvent> {
        let from = self.presented_angle();
        self.progress = progress;
        self.angle = progress.angle();

        match bridge {
            Some(bridge) => {
                let descriptor = bridge.action_for_angle(from, self.angle);
                trace!(
                    id = descriptor.id().get(),
                    from,
                    to = self.angle,
                    "angle transition"
                );
                self.transitions.push(descriptor.clone());
                vec![AnimationEvent::Started(descriptor)]
            }
            None => self.remove_all_transitions(),
        }
    }

    /// Drops transitions whose duration has elapsed, reporting them as completed stops.
    pub fn advance_animations(&mut self) -> Vec<AnimationEvent> {
        let mut finished = Vec::new();
        self.transitions.retain(|transition| {
            if transition.is_done() {
                finished.push(AnimationEvent::Stopped {
                    descriptor: transition.clone(),
                    completed: true,
                });
                false
            } else {
                true
            }
        });
        finished
    }

    pub fn remove_all_transitions(&mut self) -> Vec<AnimationEvent> {
        self.transitions
            .drain(..)
            .map(|descriptor| AnimationEvent::Stopped {
                descriptor,
                completed: false,
            })
            .collect()
    }

    pub fn are_transitions_ongoing(&self) -> bool {
        !self.transitions.is_empty()
    }
}

impl Default for ProgressLayer {
    fn default() -> Self {
        Self::new()
    }
}
