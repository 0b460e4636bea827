// 文件: strategy/filled.rs
// 作用: 填充样式
//   - 背景: 着色圆环，进度状态下以半透明着色填充
//   - 进度: 从圆心出发的扇形
//   - 附加内容: 可选

use std::rc::Rc;

use kurbo::{BezPath, Point};

use super::inset::{start_spinning_gap, stop_spinning_gap};
use super::{AdditionalContentStrategy, VisualStrategy};
use crate::progress::State;
use crate::render::{Color, Layers};
use crate::utils::{circle_path, pie_path};

const BACKGROUND_FILL_ALPHA: f32 = 0.3;

/// Tinted ring filled by a growing pie slice.
#[derive(Debug, Default)]
pub struct FilledStrategy {
    content: Option<Rc<dyn AdditionalContentStrategy>>,
}

impl FilledStrategy {
    pub fn new(content: Option<Rc<dyn AdditionalContentStrategy>>) -> Self {
        Self { content }
    }

    fn background_line_width(radius: f64) -> f64 {
        (radius * 0.15).max(4.).floor()
    }

    fn progress_radius(radius: f64) -> f64 {
        radius - (Self::background_line_width(radius) / 2.).floor()
    }

    fn animate_layers(layers: &mut Layers, state: &State) {
        match state {
            State::Indeterminate => {
                layers.background.fill_color = None;
                layers.progress.shape.opacity = 0.;
                start_spinning_gap(&mut layers.background);
            }
            State::Progress(_) => {
                layers.progress.shape.opacity = 1.;
                stop_spinning_gap(&mut layers.background);
            }
        }
    }
}

impl VisualStrategy for FilledStrategy {
    fn layout_layers(&self, layers: &mut Layers, center: Point, radius: f64) {
        layers.background.path = circle_path(center, radius);
        layers.background.line_width = Self::background_line_width(radius);

        layers.progress.shape.path = circle_path(center, Self::progress_radius(radius));
        layers.progress.shape.line_width = 0.;

        if let Some(content) = &self.content {
            content.layout_additional_content(&mut layers.additional_content, center, radius);
        }
    }

    fn transition_layers(&self, layers: &mut Layers, state: &State, tint_color: Color) {
        self.update_tint_color(tint_color, layers, state);
        Self::animate_layers(layers, state);

        if let Some(content) = &self.content {
            content.transition_additional_content(state, tint_color);
        }
    }

    fn update_tint_color(&self, tint_color: Color, layers: &mut Layers, state: &State) {
        layers.background.stroke_color = Some(tint_color);
        layers.progress.shape.stroke_color = Some(tint_color);
        layers.progress.shape.fill_color = Some(tint_color);

        if let Some(content) = &self.content {
            content.update_tint_color(tint_color, state);
        }

        layers.background.fill_color = Some(match state {
            State::Progress(_) => tint_color.with_alpha(BACKGROUND_FILL_ALPHA),
            State::Indeterminate => Color::CLEAR,
        });
    }

    fn progress_path(&self, center: Point, radius: f64, angle: f64) -> BezPath {
        pie_path(center, Self::progress_radius(radius), angle)
    }
}
