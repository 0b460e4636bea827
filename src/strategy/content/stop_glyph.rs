// 文件: strategy/content/stop_glyph.rs
// 作用: 圆心处的圆角正方形（"停止"按钮），填充着色

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};

use crate::progress::State;
use crate::render::{Color, ContentLayer, ShapeLayer, Shared, Sublayer};
use crate::strategy::AdditionalContentStrategy;
use crate::utils::rounded_rect_path;

/// 边长与半径之比
const SIDE_TO_RADIUS: f64 = 0.4;

/// Rounded square centered in the ring.
#[derive(Debug)]
pub struct StopGlyphContent {
    glyph: Shared<ShapeLayer>,
}

impl StopGlyphContent {
    pub fn new() -> Self {
        Self {
            glyph: Rc::new(RefCell::new(ShapeLayer::default())),
        }
    }

    pub fn glyph_layer(&self) -> &Shared<ShapeLayer> {
        &self.glyph
    }
}

impl Default for StopGlyphContent {
    fn default() -> Self {
        Self::new()
    }
}

impl AdditionalContentStrategy for StopGlyphContent {
    fn layout_additional_content(&self, layer: &mut ContentLayer, center: Point, radius: f64) {
        layer.add_sublayer_once(Sublayer::Shape(self.glyph.clone()));

        let side = radius * SIDE_TO_RADIUS;
        let rect = Rect::new(0., 0., side, side);

        let mut glyph = self.glyph.borrow_mut();
        glyph.path = rounded_rect_path(rect, side / 8.);
        glyph.bounds = rect;
        glyph.position = center;
    }

    fn transition_additional_content(&self, state: &State, tint_color: Color) {
        self.update_tint_color(tint_color, state);
    }

    fn update_tint_color(&self, tint_color: Color, _state: &State) {
        self.glyph.borrow_mut().fill_color = Some(tint_color);
    }
}
