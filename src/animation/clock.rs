// clock.rs
// 动画时间源：所有过渡动画和逐帧采样都从同一个共享时钟读取时间。
// 时钟可调速（慢动作调试）并可要求动画立即完成（关闭动画）。

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::utils::get_monotonic_time;

/// Shareable lazy clock that can change rate.
///
/// The clock will fetch the time once and then retain it until explicitly cleared with
/// [`Clock::clear`] or [`Clock::refresh`]. The indicator refreshes it when a transition is
/// committed and on every delivered frame, so every read within one step observes the same
/// instant.
#[derive(Debug, Default, Clone)]
pub struct Clock {
    inner: Rc<RefCell<AdjustableClock>>,
}

#[derive(Debug, Default)]
struct LazyClock {
    time: Option<Duration>,
    // 由调用方手动推进，不再读取系统时间
    manual: bool,
}

/// Clock that can adjust its rate.
#[derive(Debug)]
struct AdjustableClock {
    inner: LazyClock,
    current_time: Duration,
    last_seen_time: Duration,
    rate: f64,
    complete_instantly: bool,
}

impl Clock {
    /// Creates a new clock with the given time.
    pub fn with_time(time: Duration) -> Self {
        let clock = AdjustableClock::new(LazyClock::with_time(time));
        Self {
            inner: Rc::new(RefCell::new(clock)),
        }
    }

    /// Returns the current time, adjusted for the clock rate.
    pub fn now(&self) -> Duration {
        self.inner.borrow_mut().now()
    }

    /// Returns the underlying time not adjusted for rate change.
    pub fn now_unadjusted(&self) -> Duration {
        self.inner.borrow_mut().inner.now()
    }

    /// Sets the unadjusted clock time.
    pub fn set_unadjusted(&mut self, time: Duration) {
        self.inner.borrow_mut().inner.set(time);
    }

    /// Moves the unadjusted clock time forward by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        let now = self.now_unadjusted();
        self.set_unadjusted(now.saturating_add(delta));
    }

    /// Clears the stored time so it's re-fetched again next.
    pub fn clear(&mut self) {
        self.inner.borrow_mut().inner.clear();
    }

    /// Like [`Clock::clear`], except that clocks created with [`Clock::with_time`] keep their
    /// time until it is set again.
    pub fn refresh(&mut self) {
        let mut inner = self.inner.borrow_mut();
        if !inner.inner.manual {
            inner.inner.clear();
        }
    }

    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    /// Sets the clock rate, clamped to `0..=1000`.
    pub fn set_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().rate = rate.clamp(0., 1000.);
    }

    /// Returns whether animations should complete instantly.
    pub fn should_complete_instantly(&self) -> bool {
        self.inner.borrow().complete_instantly
    }

    pub fn set_complete_instantly(&mut self, value: bool) {
        self.inner.borrow_mut().complete_instantly = value;
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Clock {}

impl LazyClock {
    fn with_time(time: Duration) -> Self {
        Self {
            time: Some(time),
            manual: true,
        }
    }

    fn clear(&mut self) {
        self.time = None;
    }

    fn set(&mut self, time: Duration) {
        self.time = Some(time);
    }

    fn now(&mut self) -> Duration {
        *self.time.get_or_insert_with(get_monotonic_time)
    }
}

impl AdjustableClock {
    fn new(mut inner: LazyClock) -> Self {
        let time = inner.now();
        Self {
            inner,
            current_time: time,
            last_seen_time: time,
            rate: 1.,
            complete_instantly: false,
        }
    }

    fn now(&mut self) -> Duration {
        let time = self.inner.now();

        if self.last_seen_time == time {
            return self.current_time;
        }

        // 原始时间差乘以速率后累加；时间回退时同样按速率回退
        if self.last_seen_time < time {
            let delta = (time - self.last_seen_time).mul_f64(self.rate);
            self.current_time = self.current_time.saturating_add(delta);
        } else {
            let delta = (self.last_seen_time - time).mul_f64(self.rate);
            self.current_time = self.current_time.saturating_sub(delta);
        }

        self.last_seen_time = time;
        self.current_time
    }
}

impl Default for AdjustableClock {
    fn default() -> Self {
        Self::new(LazyClock::default())
    }
}
