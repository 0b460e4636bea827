// 文件: frame_clock.rs
// 作用: 帧时钟，预测下一次画面呈现的时间点，用于为逐帧回调定时
// 关键概念:
//   - 刷新间隔: 显示器刷新周期，如60Hz对应16.67ms
//   - VRR (可变刷新率): 落后超过一帧时允许立即呈现
//   - 呈现时间: 帧实际显示在屏幕上的时间点

use std::num::NonZeroU64;
use std::time::Duration;

use crate::utils::get_monotonic_time;
use crate::{Error, Result};

#[derive(Debug)]
pub struct FrameClock {
    last_presentation_time: Option<Duration>,
    refresh_interval_ns: NonZeroU64,
    vrr: bool,
}

impl FrameClock {
    /// Creates a frame clock for a display refreshing every `refresh_interval`.
    ///
    /// The interval must be non-zero and under one second.
    pub fn new(refresh_interval: Duration, vrr: bool) -> Result<Self> {
        if refresh_interval.as_secs() != 0 {
            return Err(Error::InvalidRefreshInterval(refresh_interval));
        }
        let refresh_interval_ns = NonZeroU64::new(refresh_interval.subsec_nanos().into())
            .ok_or(Error::InvalidRefreshInterval(refresh_interval))?;

        Ok(Self {
            last_presentation_time: None,
            refresh_interval_ns,
            vrr,
        })
    }

    /// Frame clock for a display refreshing `hz` times per second.
    pub fn from_refresh_rate(hz: f64, vrr: bool) -> Result<Self> {
        let interval = if hz.is_finite() && hz > 1. {
            Duration::from_secs_f64(1. / hz)
        } else {
            Duration::ZERO
        };
        Self::new(interval, vrr)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_nanos(self.refresh_interval_ns.get())
    }

    pub fn set_vrr(&mut self, vrr: bool) {
        if self.vrr == vrr {
            return;
        }

        self.vrr = vrr;
        // 刷新模式改变后重新校准
        self.last_presentation_time = None;
    }

    pub fn vrr(&self) -> bool {
        self.vrr
    }

    pub fn presented(&mut self, presentation_time: Duration) {
        if presentation_time.is_zero() {
            return;
        }

        self.last_presentation_time = Some(presentation_time);
    }

    pub fn next_presentation_time(&self) -> Duration {
        self.next_presentation_time_at(get_monotonic_time())
    }

    /// Predicts the next presentation time as seen from `now`.
    pub fn next_presentation_time_at(&self, mut now: Duration) -> Duration {
        let Some(last_presentation_time) = self.last_presentation_time else {
            return now;
        };

        let refresh_interval_ns = self.refresh_interval_ns.get();

        // VBlank 提前到达：当前时间早于上次呈现时间
        if now <= last_presentation_time {
            let orig_now = now;
            now += Duration::from_nanos(refresh_interval_ns);

            if now < last_presentation_time {
                error!(
                    now = ?orig_now,
                    ?last_presentation_time,
                    "got a 2+ early VBlank, {:?} until presentation",
                    last_presentation_time - now,
                );
                now = last_presentation_time + Duration::from_nanos(refresh_interval_ns);
            }
        }

        let since_last = now - last_presentation_time;
        let since_last_ns =
            since_last.as_secs() * 1_000_000_000 + u64::from(since_last.subsec_nanos());
        // 向上取整到刷新间隔的整数倍
        let to_next_ns = (since_last_ns / refresh_interval_ns + 1) * refresh_interval_ns;

        if self.vrr && to_next_ns > refresh_interval_ns {
            now
        } else {
            last_presentation_time + Duration::from_nanos(to_next_ns)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn rejects_bad_intervals() {
        assert!(matches!(
            FrameClock::new(Duration::ZERO, false),
            Err(Error::InvalidRefreshInterval(_))
        ));
        assert!(FrameClock::new(Duration::from_secs(1), false).is_err());
        assert!(FrameClock::from_refresh_rate(0., false).is_err());
        assert!(FrameClock::from_refresh_rate(60., false).is_ok());
    }

    #[test]
    fn without_history_presents_now() {
        let clock = FrameClock::new(MS * 16, false).unwrap();
        assert_eq!(clock.next_presentation_time_at(MS * 5), MS * 5);
    }

    #[test]
    fn rounds_up_to_next_vblank() {
        let mut clock = FrameClock::new(MS * 10, false).unwrap();
        clock.presented(MS * 100);
        assert_eq!(clock.next_presentation_time_at(MS * 103), MS * 110);
        assert_eq!(clock.next_presentation_time_at(MS * 115), MS * 120);
    }

    #[test]
    fn early_vblank_skips_a_frame() {
        let mut clock = FrameClock::new(MS * 10, false).unwrap();
        clock.presented(MS * 100);
        assert_eq!(clock.next_presentation_time_at(MS * 100), MS * 120);
    }

    #[test]
    fn vrr_presents_immediately_when_late() {
        let mut clock = FrameClock::new(MS * 10, true).unwrap();
        clock.presented(MS * 100);
        assert_eq!(clock.next_presentation_time_at(MS * 115), MS * 115);
        assert_eq!(clock.next_presentation_time_at(MS * 105), MS * 110);
    }
}
