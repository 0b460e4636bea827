// 文件: strategy/inset.rs
// 作用: 内嵌样式，常用于可下载资源的列表/网格
//   - 背景: 着色细圆环；不确定状态下留出缺口并旋转
//   - 进度: 紧贴背景圆环内侧的圆弧；不确定状态下隐藏
//   - 附加内容: 必需（通常是停止按钮），绘制在背景与进度之间

use std::rc::Rc;
use std::time::Duration;

use kurbo::{BezPath, Point};

use super::{AdditionalContentStrategy, VisualStrategy, INDETERMINATE_ANIMATION_KEY};
use crate::animation::LayerAnimation;
use crate::progress::State;
use crate::render::{Color, Layers, ShapeLayer, ZOrder};
use crate::utils::{arc_path, circle_path};

pub(crate) const ROTATION_DURATION: Duration = Duration::from_millis(1600);
pub(crate) const GAP_STROKE_END: f64 = 0.9;

/// Tinted ring with the progress arc hugging its inside edge.
#[derive(Debug)]
pub struct InsetStrategy {
    content: Rc<dyn AdditionalContentStrategy>,
}

impl InsetStrategy {
    pub fn new(content: Rc<dyn AdditionalContentStrategy>) -> Self {
        Self { content }
    }

    fn background_line_width(radius: f64) -> f64 {
        (radius * 0.08).max(2.).floor()
    }

    fn progress_line_width(radius: f64) -> f64 {
        (radius * 0.15).max(2.).floor()
    }

    fn progress_radius(radius: f64) -> f64 {
        radius - (Self::background_line_width(radius) + Self::progress_line_width(radius)) / 2.
            + 0.5
    }
}

impl VisualStrategy for InsetStrategy {
    fn layout_layers(&self, layers: &mut Layers, center: Point, radius: f64) {
        layers.background.path = circle_path(center, radius);
        layers.background.line_width = Self::background_line_width(radius);

        layers.progress.shape.path = self.progress_path(center, radius, 0.);
        layers.progress.shape.line_width = Self::progress_line_width(radius);

        self.content
            .layout_additional_content(&mut layers.additional_content, center, radius);
    }

    fn transition_layers(&self, layers: &mut Layers, state: &State, tint_color: Color) {
        match state {
            State::Indeterminate => {
                start_spinning_gap(&mut layers.background);
                layers.progress.shape.opacity = 0.;
            }
            State::Progress(_) => {
                layers.progress.shape.opacity = 1.;
                stop_spinning_gap(&mut layers.background);
            }
        }

        self.content.transition_additional_content(state, tint_color);
    }

    fn update_tint_color(&self, tint_color: Color, layers: &mut Layers, state: &State) {
        layers.background.fill_color = Some(Color::CLEAR);
        layers.background.stroke_color = Some(tint_color);

        layers.progress.shape.fill_color = Some(Color::CLEAR);
        layers.progress.shape.stroke_color = Some(tint_color);

        self.content.update_tint_color(tint_color, state);
    }

    fn progress_path(&self, center: Point, radius: f64, angle: f64) -> BezPath {
        arc_path(center, Self::progress_radius(radius), 0., angle)
    }

    fn z_order(&self) -> ZOrder {
        ZOrder::CONTENT_BELOW_PROGRESS
    }
}

/// 圆环留出10%缺口并无限旋转
pub(crate) fn start_spinning_gap(layer: &mut ShapeLayer) {
    layer.stroke_start = 0.;
    layer.stroke_end = GAP_STROKE_END;
    layer.add_animation(
        INDETERMINATE_ANIMATION_KEY,
        LayerAnimation::indeterminate_rotation(ROTATION_DURATION),
    );
}

pub(crate) fn stop_spinning_gap(layer: &mut ShapeLayer) {
    if layer.remove_animation(INDETERMINATE_ANIMATION_KEY).is_none() {
        return;
    }

    layer.stroke_start = 0.;
    layer.stroke_end = 1.;
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::animation::AnimatedProperty;
    use crate::strategy::StopGlyphContent;

    #[test]
    fn widths_and_radius() {
        // r = 40: 背景 floor(3.2) = 3，进度 floor(6) = 6
        assert_eq!(InsetStrategy::background_line_width(40.), 3.);
        assert_eq!(InsetStrategy::progress_line_width(40.), 6.);
        assert_eq!(InsetStrategy::progress_radius(40.), 36.);

        assert_eq!(InsetStrategy::background_line_width(5.), 2.);
        assert_eq!(InsetStrategy::progress_line_width(5.), 2.);
    }

    #[test]
    fn indeterminate_spins_with_a_gap() {
        let strategy = InsetStrategy::new(Rc::new(StopGlyphContent::new()));
        let mut layers = Layers::new();

        strategy.transition_layers(&mut layers, &State::Indeterminate, Color::BLUE);
        assert_eq!(layers.background.stroke_end, 0.9);
        assert_eq!(layers.progress.shape.opacity, 0.);
        let spin = layers
            .background
            .animation(INDETERMINATE_ANIMATION_KEY)
            .unwrap();
        assert_eq!(spin.property, AnimatedProperty::RotationZ);
        assert_eq!(spin.duration, Duration::from_millis(1600));
        assert_abs_diff_eq!(spin.to, 1.5 * std::f64::consts::PI);

        strategy.transition_layers(&mut layers, &State::progress(0.5), Color::BLUE);
        assert_eq!(layers.background.stroke_end, 1.);
        assert_eq!(layers.progress.shape.opacity, 1.);
        assert!(layers.background.animations().next().is_none());
    }
}
