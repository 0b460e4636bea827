//! 圆形进度指示器。
//!
//! [`ProgressIndicator`] 组合了以下部分：
//!
//! - [`ProgressLayer`]: 已提交的进度角度以及正在进行的角度过渡；
//! - [`AnimationEventBridge`]: 把角度写入转换为过渡描述符，并转发开始/结束事件；
//! - [`FrameSyncCoordinator`]: 有活动过渡时持有逐帧回调，每帧按呈现角度重建进度路径；
//! - [`VisualStrategy`]: 外部注入的视觉策略，负责图层样式和进度路径。
//!
//! 所有操作都在同一个线程上按调用顺序执行。

use std::rc::Rc;

use kurbo::Size;

use crate::animation::Clock;
use crate::config::ProgressConfig;
use crate::frame::{FrameScheduler, IndicatorId};
use crate::render::{Color, Geometry, LayerKind, Layers, ZOrder};
use crate::strategy::{BasicStrategy, PercentageContent, VisualStrategy};

mod bridge;
mod coordinator;
mod fraction;
mod layer;

pub use bridge::{AnimationDescriptor, AnimationEvent, AnimationEventBridge, DescriptorId};
pub use coordinator::{AnimationState, FrameSyncCoordinator};
pub use fraction::FractionCompleted;
pub use layer::ProgressLayer;

/// Logical state of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Indeterminate,
    Progress(FractionCompleted),
}

impl State {
    /// Shorthand for `State::Progress(FractionCompleted::new(value))`.
    pub fn progress(value: f64) -> Self {
        State::Progress(FractionCompleted::new(value))
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, State::Indeterminate)
    }

    pub fn fraction(&self) -> Option<FractionCompleted> {
        match self {
            State::Indeterminate => None,
            State::Progress(fraction) => Some(*fraction),
        }
    }
}

impl Default for State {
    fn default() -> Self {
        State::Progress(FractionCompleted::ZERO)
    }
}

/// Circular progress indicator inscribed in the shorter side of its bounds.
#[derive(Debug)]
pub struct ProgressIndicator {
    id: IndicatorId,
    state: State,
    strategy: Rc<dyn VisualStrategy>,
    layers: Layers,
    z_order: ZOrder,
    tint_color: Color,
    geometry: Geometry,
    bridge: AnimationEventBridge,
    coordinator: FrameSyncCoordinator,
}

impl ProgressIndicator {
    pub fn new(
        strategy: Rc<dyn VisualStrategy>,
        scheduler: Box<dyn FrameScheduler>,
        clock: Clock,
    ) -> Self {
        Self::with_config(strategy, scheduler, clock, &ProgressConfig::default())
    }

    pub fn with_config(
        strategy: Rc<dyn VisualStrategy>,
        scheduler: Box<dyn FrameScheduler>,
        clock: Clock,
        config: &ProgressConfig,
    ) -> Self {
        let id = IndicatorId::next();
        let z_order = config.z_order.unwrap_or_else(|| strategy.z_order());

        let mut indicator = Self {
            id,
            state: State::default(),
            strategy,
            layers: Layers::new(),
            z_order,
            tint_color: config.tint_color,
            geometry: Geometry::default(),
            bridge: AnimationEventBridge::new(clock, config.transition),
            coordinator: FrameSyncCoordinator::new(id, scheduler),
        };

        indicator.strategy.update_tint_color(
            indicator.tint_color,
            &mut indicator.layers,
            &indicator.state,
        );
        indicator
    }

    /// Indicator using [`BasicStrategy`] with a black percentage label.
    pub fn with_default_strategy(scheduler: Box<dyn FrameScheduler>, clock: Clock) -> Self {
        let content = PercentageContent::new().with_text_color(Color::BLACK);
        let strategy = BasicStrategy::new(Rc::new(content));
        Self::new(Rc::new(strategy), scheduler, clock)
    }

    pub fn id(&self) -> IndicatorId {
        self.id
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Animated transition to `state`.
    pub fn transition_to(&mut self, state: State) {
        self.set_state(state, true);
    }

    pub fn set_state(&mut self, state: State, animated: bool) {
        // 空闲期间没有帧清空时钟，过渡必须从写入时刻开始
        self.refresh_clock();

        self.state = state;
        self.strategy
            .transition_layers(&mut self.layers, &self.state, self.tint_color);

        if let State::Progress(progress) = state {
            self.set_progress(progress, animated);
        }
    }

    fn set_progress(&mut self, progress: FractionCompleted, animated: bool) {
        self.advance_transitions();

        let bridge = animated.then_some(&self.bridge);
        let events = self.layers.progress.set_progress(progress, bridge);
        for event in events {
            self.relay(event);
        }

        if !animated {
            let angle = self.layers.progress.angle();
            apply_progress_path(&mut self.layers, &*self.strategy, &self.geometry, angle);
        }
    }

    pub fn tint_color(&self) -> Color {
        self.tint_color
    }

    pub fn set_tint_color(&mut self, tint_color: Color) {
        self.tint_color = tint_color;
        self.strategy
            .update_tint_color(tint_color, &mut self.layers, &self.state);
    }

    /// Lays the indicator out in bounds of `size`.
    ///
    /// Mid-transition the progress path is rebuilt at the presented angle.
    pub fn layout(&mut self, size: Size) {
        self.geometry = Geometry::from_size(size);
        self.layers.layout(&self.geometry);
        self.strategy.layout_layers(
            &mut self.layers,
            self.geometry.center,
            self.geometry.radius,
        );

        let angle = self.layers.progress.presented_angle();
        apply_progress_path(&mut self.layers, &*self.strategy, &self.geometry, angle);
    }

    /// Per-frame callback; the host calls it whenever the scheduler delivers a frame for
    /// [`Self::id`].
    pub fn on_display_frame(&mut self) {
        self.refresh_clock();

        if !self.coordinator.is_sampling() {
            // 回调在释放前最后一次触发
            trace!(indicator = self.id.get(), "frame while idle");
            return;
        }

        let angle = self.layers.progress.presented_angle();
        trace!(indicator = self.id.get(), angle, "sampled presented angle");
        apply_progress_path(&mut self.layers, &*self.strategy, &self.geometry, angle);

        self.advance_transitions();
    }

    fn refresh_clock(&self) {
        self.bridge.clock().clone().refresh();
    }

    fn advance_transitions(&mut self) {
        let events = self.layers.progress.advance_animations();
        for event in events {
            self.relay(event);
        }
    }

    fn relay(&mut self, event: AnimationEvent) {
        let layers = &mut self.layers;
        let strategy = &*self.strategy;
        let geometry = &self.geometry;
        self.bridge
            .relay(event, &self.state, &mut self.coordinator, |angle| {
                apply_progress_path(layers, strategy, geometry, angle)
            });
    }

    pub fn strategy(&self) -> &Rc<dyn VisualStrategy> {
        &self.strategy
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn z_order(&self) -> ZOrder {
        self.z_order
    }

    /// Root layers bottom first.
    pub fn paint_order(&self) -> [LayerKind; 3] {
        self.z_order.layers()
    }

    pub fn coordinator(&self) -> &FrameSyncCoordinator {
        &self.coordinator
    }

    pub fn is_animating(&self) -> bool {
        self.coordinator.is_sampling()
    }

    pub fn presented_angle(&self) -> f64 {
        self.layers.progress.presented_angle()
    }

    pub fn clock(&self) -> &Clock {
        self.bridge.clock()
    }
}

/// 替换进度路径，不产生图层级的隐式动画
fn apply_progress_path(
    layers: &mut Layers,
    strategy: &dyn VisualStrategy,
    geometry: &Geometry,
    angle: f64,
) {
    layers.progress.shape.path = strategy.progress_path(geometry.center, geometry.radius, angle);
    strategy.did_update_progress(layers, geometry, angle);
}
