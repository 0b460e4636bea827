// 文件: strategy/content/composite.rs
// 作用: 依次转发给多个附加内容策略，后面的子策略绘制在上层

use std::rc::Rc;

use kurbo::Point;

use crate::progress::State;
use crate::render::{Color, ContentLayer};
use crate::strategy::AdditionalContentStrategy;

#[derive(Debug, Default)]
pub struct CompositeContent {
    children: Vec<Rc<dyn AdditionalContentStrategy>>,
}

impl CompositeContent {
    pub fn new(children: Vec<Rc<dyn AdditionalContentStrategy>>) -> Self {
        Self { children }
    }

    pub fn children(&self) -> &[Rc<dyn AdditionalContentStrategy>] {
        &self.children
    }
}

impl AdditionalContentStrategy for CompositeContent {
    fn layout_additional_content(&self, layer: &mut ContentLayer, center: Point, radius: f64) {
        for child in &self.children {
            child.layout_additional_content(layer, center, radius);
        }
    }

    fn transition_additional_content(&self, state: &State, tint_color: Color) {
        for child in &self.children {
            child.transition_additional_content(state, tint_color);
        }
    }

    fn update_tint_color(&self, tint_color: Color, state: &State) {
        for child in &self.children {
            child.update_tint_color(tint_color, state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Sublayer;
    use crate::strategy::{EmitterContent, StopGlyphContent};

    #[test]
    fn children_stack_in_order() {
        let stop = Rc::new(StopGlyphContent::new());
        let emitter = Rc::new(EmitterContent::new());
        let children: Vec<Rc<dyn AdditionalContentStrategy>> = vec![
            stop.clone() as Rc<dyn AdditionalContentStrategy>,
            emitter.clone() as Rc<dyn AdditionalContentStrategy>,
        ];
        let composite = CompositeContent::new(children);

        let mut layer = ContentLayer::default();
        composite.layout_additional_content(&mut layer, Point::new(20., 20.), 20.);

        match layer.sublayers.as_slice() {
            [Sublayer::Shape(glyph), Sublayer::Emitter(sparks)] => {
                assert!(Rc::ptr_eq(glyph, stop.glyph_layer()));
                assert!(Rc::ptr_eq(sparks, emitter.emitter_layer()));
            }
            other => panic!("unexpected sublayers {other:?}"),
        }

        composite.update_tint_color(Color::GREEN, &State::default());
        assert_eq!(stop.glyph_layer().borrow().fill_color, Some(Color::GREEN));
        assert_eq!(emitter.emitter_layer().borrow().color, Color::GREEN);
    }
}
