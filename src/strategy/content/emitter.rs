// 文件: strategy/content/emitter.rs
// 作用: 圆心处持续发射的粒子，颜色取着色

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;

use crate::progress::State;
use crate::render::{Color, ContentLayer, EmitterLayer, Shared, Sublayer};
use crate::strategy::AdditionalContentStrategy;

const BIRTH_RATE: f32 = 250.;

/// Sparks emitted from the center.
#[derive(Debug)]
pub struct EmitterContent {
    emitter: Shared<EmitterLayer>,
}

impl EmitterContent {
    pub fn new() -> Self {
        let emitter = EmitterLayer {
            birth_rate: BIRTH_RATE,
            ..EmitterLayer::default()
        };
        Self {
            emitter: Rc::new(RefCell::new(emitter)),
        }
    }

    pub fn emitter_layer(&self) -> &Shared<EmitterLayer> {
        &self.emitter
    }
}

impl Default for EmitterContent {
    fn default() -> Self {
        Self::new()
    }
}

impl AdditionalContentStrategy for EmitterContent {
    fn layout_additional_content(&self, layer: &mut ContentLayer, center: Point, _radius: f64) {
        layer.add_sublayer_once(Sublayer::Emitter(self.emitter.clone()));
        self.emitter.borrow_mut().position = center;
    }

    fn transition_additional_content(&self, _state: &State, _tint_color: Color) {}

    fn update_tint_color(&self, tint_color: Color, _state: &State) {
        self.emitter.borrow_mut().color = tint_color;
    }
}
