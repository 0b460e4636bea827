// 文件: strategy/content/percentage.rs
// 作用: 在圆心显示完成百分比，字号随半径缩放

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};

use crate::progress::{FractionCompleted, State};
use crate::render::{Color, ContentLayer, Shared, Sublayer, TextLayer};
use crate::strategy::AdditionalContentStrategy;

const MAX_FONT_SIZE: f64 = 120.;
/// 字号小于此值时隐藏文字
const MIN_VISIBLE_FONT_SIZE: f64 = 13.;
/// 文字最大宽度与半径之比
const WIDTH_TO_RADIUS: f64 = 1.3;
/// 等宽字形的平均前进宽度与字号之比
const ADVANCE_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Centered "42%" label.
#[derive(Debug)]
pub struct PercentageContent {
    text_color: Option<Color>,
    text: Shared<TextLayer>,
}

impl PercentageContent {
    pub fn new() -> Self {
        Self {
            text_color: None,
            text: Rc::new(RefCell::new(TextLayer::default())),
        }
    }

    /// Uses `color` for the text instead of the tint color.
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }

    pub fn text_layer(&self) -> &Shared<TextLayer> {
        &self.text
    }

    pub fn format(fraction: FractionCompleted) -> String {
        format!("{}%", (fraction.raw() * 100.).round() as u32)
    }

    /// Width of `text` at `font_size`.
    fn measure(text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * ADVANCE_RATIO
    }

    /// Largest whole font size whose "100%" fits in `max_width`.
    fn font_size(max_width: f64) -> f64 {
        let prototype = Self::format(FractionCompleted::ONE);

        let mut font_size = MAX_FONT_SIZE;
        while font_size > 0. && Self::measure(&prototype, font_size) > max_width {
            font_size -= 1.;
        }
        font_size.max(0.)
    }
}

impl Default for PercentageContent {
    fn default() -> Self {
        Self::new()
    }
}

impl AdditionalContentStrategy for PercentageContent {
    fn layout_additional_content(&self, layer: &mut ContentLayer, center: Point, radius: f64) {
        layer.add_sublayer_once(Sublayer::Text(self.text.clone()));

        let font_size = Self::font_size(radius * WIDTH_TO_RADIUS);
        let prototype = Self::format(FractionCompleted::ONE);
        let width = Self::measure(&prototype, font_size);
        let height = font_size * LINE_HEIGHT_RATIO;

        let mut text = self.text.borrow_mut();
        text.bounds = Rect::new(0., 0., width, height);
        text.position = center;
        text.font_size = font_size;
        text.hidden = font_size < MIN_VISIBLE_FONT_SIZE;
    }

    fn transition_additional_content(&self, state: &State, tint_color: Color) {
        let State::Progress(fraction) = *state else {
            return;
        };

        // 不确定状态保留上一次的文字
        self.update_tint_color(tint_color, state);
        self.text.borrow_mut().string = Self::format(fraction);
    }

    fn update_tint_color(&self, tint_color: Color, _state: &State) {
        self.text.borrow_mut().foreground = self.text_color.unwrap_or(tint_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_percentages() {
        insta::assert_snapshot!(PercentageContent::format(FractionCompleted::new(0.)), @"0%");
        insta::assert_snapshot!(PercentageContent::format(FractionCompleted::new(0.426)), @"43%");
        insta::assert_snapshot!(PercentageContent::format(FractionCompleted::new(1.)), @"100%");
    }

    #[test]
    fn font_size_fits_radius() {
        // "100%" 宽度为 4 × 0.6 × 字号
        assert_eq!(PercentageContent::font_size(1000.), 120.);
        assert_eq!(PercentageContent::font_size(65.), 27.);
        assert_eq!(PercentageContent::font_size(-1.), 0.);
    }

    #[test]
    fn small_radius_hides_text() {
        let content = PercentageContent::new();
        let mut layer = ContentLayer::default();

        content.layout_additional_content(&mut layer, Point::new(10., 10.), 10.);
        assert!(content.text_layer().borrow().hidden);

        content.layout_additional_content(&mut layer, Point::new(50., 50.), 50.);
        let text = content.text_layer().borrow();
        assert!(!text.hidden);
        assert_eq!(text.position, Point::new(50., 50.));
        assert_eq!(layer.sublayers.len(), 1);
    }

    #[test]
    fn indeterminate_keeps_last_text() {
        let content = PercentageContent::new().with_text_color(Color::BLACK);
        content.transition_additional_content(&State::progress(0.25), Color::RED);
        content.transition_additional_content(&State::Indeterminate, Color::RED);

        let text = content.text_layer().borrow();
        assert_eq!(text.string, "25%");
        assert_eq!(text.foreground, Color::BLACK);
    }
}
