// 文件: strategy/basic.rs
// 作用: 基础样式
//   - 背景: 细黑圆环，忽略着色；不确定状态下线宽"脉动"
//   - 进度: 跨在背景圆环上的圆弧，颜色取着色；不确定状态下半透明
//   - 附加内容: 必需，通常是百分比文字

use std::rc::Rc;
use std::time::Duration;

use kurbo::{BezPath, Point};

use super::{AdditionalContentStrategy, VisualStrategy};
use crate::animation::{AnimatedProperty, LayerAnimation};
use crate::progress::State;
use crate::render::{Color, Layers, ShapeLayer};
use crate::utils::{arc_path, circle_path};

const PULSE_KEY: &str = "line_width";
const PULSE_SCALE: f64 = 4.;
const PULSE_DURATION: Duration = Duration::from_secs(1);

const INDETERMINATE_PROGRESS_OPACITY: f32 = 0.3;
const DEFAULT_PROGRESS_OPACITY: f32 = 1.;

/// Thin black ring with a tinted arc straddling it.
#[derive(Debug)]
pub struct BasicStrategy {
    content: Rc<dyn AdditionalContentStrategy>,
}

impl BasicStrategy {
    pub fn new(content: Rc<dyn AdditionalContentStrategy>) -> Self {
        Self { content }
    }

    fn progress_line_width(radius: f64) -> f64 {
        (radius * 0.125).max(4.)
    }

    fn progress_opacity(state: &State) -> f32 {
        match state {
            State::Indeterminate => INDETERMINATE_PROGRESS_OPACITY,
            State::Progress(_) => DEFAULT_PROGRESS_OPACITY,
        }
    }
}

impl VisualStrategy for BasicStrategy {
    fn layout_layers(&self, layers: &mut Layers, center: Point, radius: f64) {
        let path = circle_path(center, radius);
        layers.background.path = path.clone();
        layers.progress.shape.path = path;
        layers.progress.shape.line_width = Self::progress_line_width(radius);

        self.content
            .layout_additional_content(&mut layers.additional_content, center, radius);
    }

    fn transition_layers(&self, layers: &mut Layers, state: &State, tint_color: Color) {
        settle_pulse(&mut layers.background);

        if state.is_indeterminate() {
            add_pulse(&mut layers.background);
        }
        layers.progress.shape.opacity = Self::progress_opacity(state);

        self.content.transition_additional_content(state, tint_color);
    }

    fn update_tint_color(&self, tint_color: Color, layers: &mut Layers, state: &State) {
        layers.background.fill_color = Some(Color::CLEAR);
        layers.background.stroke_color = Some(Color::BLACK);

        let progress = &mut layers.progress.shape;
        progress.fill_color = Some(Color::CLEAR);
        progress.stroke_color = Some(tint_color);
        progress.opacity = Self::progress_opacity(state);

        self.content.update_tint_color(tint_color, state);
    }

    fn progress_path(&self, center: Point, radius: f64, angle: f64) -> BezPath {
        arc_path(center, radius, 0., angle)
    }
}

fn add_pulse(background: &mut ShapeLayer) {
    background.add_animation(
        PULSE_KEY,
        LayerAnimation {
            property: AnimatedProperty::LineWidth,
            from: None,
            to: background.line_width * PULSE_SCALE,
            duration: PULSE_DURATION,
            autoreverses: true,
            repeats_forever: true,
        },
    );
}

/// 从脉动峰值平滑回到模型线宽，而不是直接跳变
fn settle_pulse(background: &mut ShapeLayer) {
    let Some(pulse) = background.animation(PULSE_KEY) else {
        return;
    };
    if !pulse.repeats_forever {
        return;
    }

    let settle = LayerAnimation {
        property: AnimatedProperty::LineWidth,
        from: Some(pulse.to),
        to: background.line_width,
        duration: PULSE_DURATION,
        autoreverses: false,
        repeats_forever: false,
    };
    background.add_animation(PULSE_KEY, settle);
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::*;
    use crate::render::{Geometry, Sublayer};
    use crate::strategy::PercentageContent;

    fn strategy() -> (BasicStrategy, Layers) {
        let strategy = BasicStrategy::new(Rc::new(PercentageContent::new()));
        let mut layers = Layers::new();
        let geometry = Geometry::from_size(Size::new(100., 100.));
        layers.layout(&geometry);
        strategy.layout_layers(&mut layers, geometry.center, geometry.radius);
        (strategy, layers)
    }

    #[test]
    fn line_width_has_a_floor() {
        assert_eq!(BasicStrategy::progress_line_width(80.), 10.);
        assert_eq!(BasicStrategy::progress_line_width(10.), 4.);
    }

    #[test]
    fn layout_adds_content() {
        let (_, layers) = strategy();
        assert_eq!(layers.progress.shape.line_width, 6.25);
        assert!(matches!(
            layers.additional_content.sublayers.as_slice(),
            [Sublayer::Text(_)]
        ));
    }

    #[test]
    fn indeterminate_pulses_then_settles() {
        let (strategy, mut layers) = strategy();

        strategy.transition_layers(&mut layers, &State::Indeterminate, Color::RED);
        let pulse = layers.background.animation(PULSE_KEY).unwrap();
        assert!(pulse.repeats_forever && pulse.autoreverses);
        assert_eq!(pulse.to, 4.);
        assert_eq!(layers.progress.shape.opacity, 0.3);

        strategy.transition_layers(&mut layers, &State::progress(0.2), Color::RED);
        let settle = layers.background.animation(PULSE_KEY).unwrap();
        assert!(!settle.repeats_forever);
        assert_eq!(settle.from, Some(4.));
        assert_eq!(settle.to, 1.);
        assert_eq!(layers.progress.shape.opacity, 1.);
    }

    #[test]
    fn background_ignores_tint() {
        let (strategy, mut layers) = strategy();
        strategy.update_tint_color(Color::GREEN, &mut layers, &State::default());
        assert_eq!(layers.background.stroke_color, Some(Color::BLACK));
        assert_eq!(layers.progress.shape.stroke_color, Some(Color::GREEN));
    }
}
