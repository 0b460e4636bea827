// animation/mod.rs
// 动画系统核心模块：定义缓动曲线、单标量过渡动画，以及图层上自包含的循环动画。
// 进度角度的过渡由 Animation 驱动，逐帧采样时读取 value()。

use std::f64::consts::{PI, TAU};
use std::time::Duration;

use keyframe::functions::{EaseOutCubic, EaseOutQuad};
use keyframe::EasingFunction;

use crate::config::TransitionConfig;

mod clock;
pub use clock::Clock;

/// Scalar transition from `from` to `to` over a fixed duration.
#[derive(Debug, Clone)]
pub struct Animation {
    from: f64,
    to: f64,
    is_off: bool,
    duration: Duration,
    start_time: Duration,
    clock: Clock,
    curve: Curve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    #[default]
    Linear,
    EaseOutQuad,
    EaseOutCubic,
    EaseOutExpo,
}

impl Animation {
    pub fn new(clock: Clock, from: f64, to: f64, config: TransitionConfig) -> Self {
        let mut rv = Self::ease(clock, from, to, u64::from(config.duration_ms), config.curve);
        if config.off {
            rv.is_off = true;
            rv.duration = Duration::ZERO;
        }
        rv
    }

    pub fn ease(clock: Clock, from: f64, to: f64, duration_ms: u64, curve: Curve) -> Self {
        Self {
            from,
            to,
            is_off: false,
            duration: Duration::from_millis(duration_ms),
            start_time: clock.now(),
            clock,
            curve,
        }
    }

    pub fn is_done(&self) -> bool {
        if self.is_off || self.clock.should_complete_instantly() {
            return true;
        }

        self.clock.now() >= self.start_time + self.duration
    }

    pub fn value_at(&self, at: Duration) -> f64 {
        if at <= self.start_time {
            // 时长为零时起点即终点
            if self.duration.is_zero() {
                return self.to;
            }
            return self.from;
        } else if self.start_time + self.duration <= at {
            return self.to;
        }

        if self.is_off || self.clock.should_complete_instantly() {
            return self.to;
        }

        let passed = at.saturating_sub(self.start_time).as_secs_f64();
        let total = self.duration.as_secs_f64();
        let x = (passed / total).clamp(0., 1.);
        self.curve.y(x) * (self.to - self.from) + self.from
    }

    pub fn value(&self) -> f64 {
        self.value_at(self.clock.now())
    }

    pub fn to(&self) -> f64 {
        self.to
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl Curve {
    pub fn y(self, x: f64) -> f64 {
        match self {
            Curve::Linear => x,
            Curve::EaseOutQuad => EaseOutQuad.y(x),
            Curve::EaseOutCubic => EaseOutCubic.y(x),
            Curve::EaseOutExpo => 1. - 2f64.powf(-10. * x),
        }
    }
}

/// Layer property driven by a [`LayerAnimation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    LineWidth,
    RotationZ,
}

/// Self-contained layer animation with no frame-callback coupling.
///
/// Strategies attach these to layers for indeterminate motion; the host evaluates them with
/// [`LayerAnimation::value_at`] using the time elapsed since the animation was added.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerAnimation {
    pub property: AnimatedProperty,
    /// `None` starts from the layer's model value.
    pub from: Option<f64>,
    pub to: f64,
    pub duration: Duration,
    pub autoreverses: bool,
    pub repeats_forever: bool,
}

impl LayerAnimation {
    /// 指示不确定状态的旋转：旋转到 2π − π/2 后无限循环
    pub fn indeterminate_rotation(duration: Duration) -> Self {
        Self {
            property: AnimatedProperty::RotationZ,
            from: Some(0.),
            to: TAU - PI / 2.,
            duration,
            autoreverses: false,
            repeats_forever: true,
        }
    }

    /// Returns the animated value `elapsed` after the animation was added.
    ///
    /// `model` stands in for an unset `from`.
    pub fn value_at(&self, elapsed: Duration, model: f64) -> f64 {
        let from = self.from.unwrap_or(model);
        if self.duration.is_zero() {
            return self.to;
        }

        let cycle = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let cycles_per_period = if self.autoreverses { 2. } else { 1. };

        if !self.repeats_forever && cycle >= cycles_per_period {
            // 非循环动画结束后回到模型值
            return model;
        }

        let phase = cycle % cycles_per_period;
        let x = if phase <= 1. { phase } else { 2. - phase };
        from + (self.to - from) * x
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn clock_at(ms: u64) -> Clock {
        Clock::with_time(Duration::from_millis(ms))
    }

    #[test]
    fn linear_interpolation() {
        let mut clock = clock_at(0);
        let anim = Animation::ease(clock.clone(), 0., 10., 400, Curve::Linear);
        assert_eq!(anim.value(), 0.);

        clock.set_unadjusted(Duration::from_millis(100));
        assert_abs_diff_eq!(anim.value(), 2.5, epsilon = 1e-9);
        assert!(!anim.is_done());

        clock.set_unadjusted(Duration::from_millis(400));
        assert_eq!(anim.value(), 10.);
        assert!(anim.is_done());
    }

    #[test]
    fn off_config_completes_immediately() {
        let clock = clock_at(0);
        let config = TransitionConfig {
            off: true,
            ..TransitionConfig::default()
        };
        let anim = Animation::new(clock, 1., 3., config);
        assert!(anim.is_done());
        assert_eq!(anim.value(), 3.);
    }

    #[test]
    fn complete_instantly_short_circuits() {
        let mut clock = clock_at(0);
        let anim = Animation::ease(clock.clone(), 0., 1., 400, Curve::EaseOutCubic);
        clock.set_complete_instantly(true);
        assert!(anim.is_done());
        clock.set_unadjusted(Duration::from_millis(10));
        assert_eq!(anim.value(), 1.);
    }

    #[test]
    fn curves_hit_endpoints() {
        for curve in [
            Curve::Linear,
            Curve::EaseOutQuad,
            Curve::EaseOutCubic,
        ] {
            assert_abs_diff_eq!(curve.y(0.), 0., epsilon = 1e-9);
            assert_abs_diff_eq!(curve.y(1.), 1., epsilon = 1e-9);
        }
        assert!(Curve::EaseOutExpo.y(1.) > 0.999);
    }

    #[test]
    fn autoreversing_pulse() {
        let pulse = LayerAnimation {
            property: AnimatedProperty::LineWidth,
            from: None,
            to: 8.,
            duration: Duration::from_secs(1),
            autoreverses: true,
            repeats_forever: true,
        };
        assert_abs_diff_eq!(pulse.value_at(Duration::ZERO, 2.), 2.);
        assert_abs_diff_eq!(pulse.value_at(Duration::from_millis(500), 2.), 5.);
        assert_abs_diff_eq!(pulse.value_at(Duration::from_millis(1500), 2.), 5.);
        assert_abs_diff_eq!(pulse.value_at(Duration::from_millis(2000), 2.), 2.);
    }

    #[test]
    fn one_shot_returns_to_model() {
        let settle = LayerAnimation {
            property: AnimatedProperty::LineWidth,
            from: Some(8.),
            to: 2.,
            duration: Duration::from_secs(1),
            autoreverses: false,
            repeats_forever: false,
        };
        assert_abs_diff_eq!(settle.value_at(Duration::from_millis(500), 2.), 5.);
        assert_abs_diff_eq!(settle.value_at(Duration::from_secs(3), 2.), 2.);
    }
}
