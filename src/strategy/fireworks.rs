// 文件: strategy/fireworks.rs
// 作用: 烟花样式，进度圆弧的前端带一个粒子发射器
//   - 背景: 着色细圆环；不确定状态下留出缺口并旋转
//   - 进度: 使用着色的三分色描边
//   - 发射器: 随呈现角度移动，发射速率/速度/扩散角随进度增长

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use kurbo::{BezPath, Point};

use super::inset::{start_spinning_gap, stop_spinning_gap};
use super::VisualStrategy;
use crate::progress::State;
use crate::render::{Color, EmitterLayer, Geometry, Layers, Shared, Sublayer};
use crate::utils::{arc_path, circle_path, point_on_circle};

const MAX_BIRTH_RATE: f64 = 200.;
const MAX_VELOCITY: f64 = 250.;

/// Ring whose progress arc trails sparks from its leading edge.
#[derive(Debug)]
pub struct FireworksStrategy {
    emitter: Shared<EmitterLayer>,
}

impl FireworksStrategy {
    pub fn new() -> Self {
        Self {
            emitter: Rc::new(RefCell::new(EmitterLayer::default())),
        }
    }

    pub fn emitter(&self) -> &Shared<EmitterLayer> {
        &self.emitter
    }

    fn background_line_width(radius: f64) -> f64 {
        (radius * 0.075).max(2.).floor()
    }

    fn progress_line_width(radius: f64) -> f64 {
        (radius * 0.15).max(2.).floor()
    }
}

impl Default for FireworksStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl VisualStrategy for FireworksStrategy {
    fn layout_layers(&self, layers: &mut Layers, center: Point, radius: f64) {
        layers.background.path = circle_path(center, radius);
        layers.background.line_width = Self::background_line_width(radius);

        layers.progress.shape.path = self.progress_path(center, radius, 0.);
        layers.progress.shape.line_width = Self::progress_line_width(radius);

        layers
            .progress
            .shape
            .add_sublayer_once(Sublayer::Emitter(self.emitter.clone()));
        self.emitter.borrow_mut().position = center;
    }

    fn transition_layers(&self, layers: &mut Layers, state: &State, _tint_color: Color) {
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
    }

    fn update_tint_color(&self, tint_color: Color, layers: &mut Layers, _state: &State) {
        layers.background.fill_color = Some(Color::CLEAR);
        layers.background.stroke_color = Some(tint_color);

        layers.progress.shape.fill_color = Some(Color::CLEAR);
        layers.progress.shape.stroke_color = Some(tint_color.triad().1);

        self.emitter.borrow_mut().color = tint_color;
    }

    fn progress_path(&self, center: Point, radius: f64, angle: f64) -> BezPath {
        arc_path(center, radius, 0., angle)
    }

    fn did_update_progress(&self, _layers: &mut Layers, geometry: &Geometry, angle: f64) {
        let fraction = angle / TAU;

        let mut emitter = self.emitter.borrow_mut();
        emitter.position = point_on_circle(geometry.center, geometry.radius, angle);
        emitter.emission_range = angle;
        emitter.velocity = fraction * MAX_VELOCITY;
        emitter.birth_rate = (fraction * MAX_BIRTH_RATE) as f32;
    }
}
