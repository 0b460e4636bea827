//! 逐帧回调注册服务。
//!
//! 协调器在第一个过渡动画开始时注册一个逐帧回调，在最后一个动画结束时释放它。
//! 回调的投递方式由宿主决定：
//!
//! - [`ManualFrameScheduler`]: 宿主自己有显示链接（或在测试中），查询注册状态后自行调用
//!   [`ProgressIndicator::on_display_frame`](crate::ProgressIndicator::on_display_frame)。
//! - [`CalloopFrameScheduler`]: 在 calloop 事件循环上插入按 [`FrameClock`] 节拍触发的定时器，
//!   把回调投递给实现了 [`FrameSink`] 的循环数据。

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::LoopHandle;

use crate::frame_clock::FrameClock;
use crate::utils::get_monotonic_time;
use crate::utils::id::IdCounter;

static INDICATOR_IDS: IdCounter = IdCounter::new();
static CALLBACK_IDS: IdCounter = IdCounter::new();

/// Identifies the indicator a frame callback is delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndicatorId(u64);

impl IndicatorId {
    pub fn next() -> Self {
        Self(INDICATOR_IDS.next())
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// A live per-frame callback registration.
///
/// Not `Clone`: exactly one owner holds it, and handing it back to
/// [`FrameScheduler::release`] is the only way to end the registration.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "a frame callback stays registered until released"]
pub struct FrameCallback {
    id: u64,
    target: IndicatorId,
}

impl FrameCallback {
    fn new(target: IndicatorId) -> Self {
        Self {
            id: CALLBACK_IDS.next(),
            target,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn target(&self) -> IndicatorId {
        self.target
    }
}

/// Registers and releases per-display-frame callbacks.
pub trait FrameScheduler {
    /// Starts delivering a callback to `target` once per display frame.
    fn register(&mut self, target: IndicatorId) -> FrameCallback;

    /// Stops the callback. Must be called exactly once per registration.
    fn release(&mut self, callback: FrameCallback);
}

/// Receives frame callbacks from a [`CalloopFrameScheduler`].
pub trait FrameSink {
    fn on_display_frame(&mut self, target: IndicatorId);
}

/// Scheduler whose callbacks are delivered by the host.
///
/// Clones share the same registrations, so a host can keep one clone and hand another to the
/// indicator.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

#[derive(Debug, Default)]
struct ManualInner {
    active: Vec<(u64, IndicatorId)>,
    registrations: u64,
    releases: u64,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Targets that currently want a frame callback.
    pub fn active_targets(&self) -> Vec<IndicatorId> {
        self.inner.borrow().active.iter().map(|(_, t)| *t).collect()
    }

    pub fn is_registered(&self, target: IndicatorId) -> bool {
        self.inner.borrow().active.iter().any(|(_, t)| *t == target)
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    /// Total number of registrations made so far.
    pub fn registrations(&self) -> u64 {
        self.inner.borrow().registrations
    }

    /// Total number of releases made so far.
    pub fn releases(&self) -> u64 {
        self.inner.borrow().releases
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn register(&mut self, target: IndicatorId) -> FrameCallback {
        let callback = FrameCallback::new(target);
        let mut inner = self.inner.borrow_mut();
        inner.active.push((callback.id, target));
        inner.registrations += 1;
        callback
    }

    fn release(&mut self, callback: FrameCallback) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.active.len();
        inner.active.retain(|(id, _)| *id != callback.id);
        if inner.active.len() == before {
            warn!(id = callback.id, "released a frame callback that was not registered");
        }
        inner.releases += 1;
    }
}

/// Scheduler that paces callbacks with calloop timers and a [`FrameClock`].
///
/// Released timers are not removed from the loop right away: a release can happen inside the
/// timer's own callback, so each timer checks its flag and drops itself the next time it fires.
pub struct CalloopFrameScheduler<D: FrameSink + 'static> {
    handle: LoopHandle<'static, D>,
    frame_clock: Rc<RefCell<FrameClock>>,
    released: HashMap<u64, Rc<Cell<bool>>>,
}

impl<D: FrameSink + 'static> CalloopFrameScheduler<D> {
    pub fn new(handle: LoopHandle<'static, D>, frame_clock: FrameClock) -> Self {
        Self {
            handle,
            frame_clock: Rc::new(RefCell::new(frame_clock)),
            released: HashMap::new(),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.frame_clock.borrow().refresh_interval()
    }

    pub fn active_count(&self) -> usize {
        self.released.len()
    }
}

impl<D: FrameSink + 'static> FrameScheduler for CalloopFrameScheduler<D> {
    fn register(&mut self, target: IndicatorId) -> FrameCallback {
        let callback = FrameCallback::new(target);
        let frame_clock = self.frame_clock.clone();
        let released = Rc::new(Cell::new(false));
        let first = {
            let now = get_monotonic_time();
            frame_clock.borrow().next_presentation_time_at(now).saturating_sub(now)
        };

        let timer = Timer::from_duration(first);
        let flag = released.clone();
        let res = self.handle.insert_source(timer, move |_, _, data| {
            if flag.get() {
                return TimeoutAction::Drop;
            }

            let now = get_monotonic_time();
            frame_clock.borrow_mut().presented(now);

            data.on_display_frame(target);

            // 回调内部可能已经释放
            if flag.get() {
                return TimeoutAction::Drop;
            }

            let now = get_monotonic_time();
            let next = frame_clock.borrow().next_presentation_time_at(now);
            TimeoutAction::ToDuration(next.saturating_sub(now))
        });

        match res {
            Ok(_) => {
                self.released.insert(callback.id, released);
            }
            Err(err) => {
                // 定时器源插入失败时回调不会触发；释放时无需处理
                error!(id = callback.id, "error inserting frame timer: {err}");
            }
        }

        callback
    }

    fn release(&mut self, callback: FrameCallback) {
        if let Some(released) = self.released.remove(&callback.id) {
            released.set(true);
        }
    }
}
