//! 指示器级别的场景测试：确定性时钟 + 手动逐帧调度。

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{BezPath, Point, Size};

use crate::animation::Clock;
use crate::frame::ManualFrameScheduler;
use crate::progress::{ProgressIndicator, State};
use crate::render::{Color, Geometry, Layers};
use crate::strategy::VisualStrategy;
use crate::utils::arc_path;


#[derive(Debug, Clone, PartialEq)]
enum Call {
    Layout { center: Point, radius: f64 },
    Transition(State),
    Tint(Color, State),
    Path(f64),
    DidUpdate(f64),
}

/// Strategy that records every call it receives.
#[derive(Debug, Default)]
struct Recorder {
    calls: RefCell<Vec<Call>>,
}

impl Recorder {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn path_angles(&self) -> Vec<f64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Path(angle) => Some(*angle),
                _ => None,
            })
            .collect()
    }

    fn last_path_angle(&self) -> Option<f64> {
        self.path_angles().last().copied()
    }
}

impl VisualStrategy for Recorder {
    fn layout_layers(&self, _layers: &mut Layers, center: Point, radius: f64) {
        self.calls.borrow_mut().push(Call::Layout { center, radius });
    }

    fn transition_layers(&self, _layers: &mut Layers, state: &State, _tint_color: Color) {
        self.calls.borrow_mut().push(Call::Transition(*state));
    }

    fn update_tint_color(&self, tint_color: Color, _layers: &mut Layers, state: &State) {
        self.calls.borrow_mut().push(Call::Tint(tint_color, *state));
    }

    fn progress_path(&self, center: Point, radius: f64, angle: f64) -> BezPath {
        self.calls.borrow_mut().push(Call::Path(angle));
        arc_path(center, radius, 0., angle)
    }

    fn did_update_progress(&self, _layers: &mut Layers, _geometry: &Geometry, angle: f64) {
        self.calls.borrow_mut().push(Call::DidUpdate(angle));
    }
}

struct Fixture {
    clock: Clock,
    scheduler: ManualFrameScheduler,
    recorder: Rc<Recorder>,
    indicator: ProgressIndicator,
}

impl Fixture {
    fn new() -> Self {
        let clock = Clock::with_time(Duration::ZERO);
        let scheduler = ManualFrameScheduler::new();
        let recorder = Rc::new(Recorder::default());
        let mut indicator = ProgressIndicator::new(
            recorder.clone(),
            Box::new(scheduler.clone()),
            clock.clone(),
        );
        indicator.layout(Size::new(100., 100.));
        recorder.clear();

        Self {
            clock,
            scheduler,
            recorder,
            indicator,
        }
    }

    fn set_time(&mut self, ms: u64) {
        self.clock.set_unadjusted(Duration::from_millis(ms));
    }

    /// Advances to `ms` and delivers a frame if the indicator wants one.
    fn frame_at(&mut self, ms: u64) {
        self.set_time(ms);
        if self.scheduler.is_registered(self.indicator.id()) {
            self.indicator.on_display_frame();
        }
    }

    /// Frame callback registration and descriptor set must agree.
    fn check_invariant(&self) {
        let registered = self.scheduler.is_registered(self.indicator.id());
        let active = !self.indicator.coordinator().active_animations().is_empty();
        assert_eq!(registered, active);
        assert_eq!(registered, self.indicator.coordinator().has_frame_callback());
    }
}
