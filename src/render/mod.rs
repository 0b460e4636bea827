//! 保留模式的图层模型。
//!
//! 指示器拥有三个根图层（背景、进度、附加内容），视觉策略只修改图层的样式和路径，
//! 图层的位置和尺寸由指示器在布局时设置。附加内容策略自己持有子图层句柄
//! （`Rc<RefCell<_>>`），以便在状态或着色变化时直接更新。

use std::cell::RefCell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use kurbo::{BezPath, Point, Rect, Size};

use crate::animation::LayerAnimation;
use crate::progress::ProgressLayer;
use crate::Result;

mod color;
pub use color::Color;

/// Shared handle to a sublayer, held both by its superlayer and by the strategy that made it.
pub type Shared<T> = Rc<RefCell<T>>;

/// Center and radius of the inscribed circle, cached on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub bounds: Rect,
    pub center: Point,
    pub radius: f64,
}

impl Geometry {
    pub fn from_size(size: Size) -> Self {
        let bounds = Rect::from_origin_size(Point::ZERO, size);
        Self {
            bounds,
            center: crate::utils::center(bounds),
            radius: crate::utils::inscribed_radius(size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Background,
    Progress,
    AdditionalContent,
}

/// Paint order of the three root layers, bottom first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrder([LayerKind; 3]);

impl ZOrder {
    pub fn new(order: [LayerKind; 3]) -> Result<Self> {
        for (i, kind) in order.iter().enumerate() {
            if order[..i].contains(kind) {
                return Err(crate::Error::DuplicateLayer(*kind));
            }
        }
        Ok(Self(order))
    }

    /// 附加内容夹在背景和进度之间
    pub const CONTENT_BELOW_PROGRESS: ZOrder = ZOrder([
        LayerKind::Background,
        LayerKind::AdditionalContent,
        LayerKind::Progress,
    ]);

    pub fn layers(&self) -> [LayerKind; 3] {
        self.0
    }

    /// 数值越大越靠上
    pub fn z_index(&self, kind: LayerKind) -> usize {
        self.0.iter().position(|k| *k == kind).unwrap_or(0)
    }
}

impl Default for ZOrder {
    fn default() -> Self {
        Self([
            LayerKind::Background,
            LayerKind::Progress,
            LayerKind::AdditionalContent,
        ])
    }
}

/// Stroked/filled vector layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLayer {
    pub bounds: Rect,
    pub position: Point,
    /// Rotation about `position`, in radians.
    pub rotation: f64,
    pub path: BezPath,
    pub line_width: f64,
    pub stroke_color: Option<Color>,
    pub fill_color: Option<Color>,
    pub opacity: f32,
    pub stroke_start: f64,
    pub stroke_end: f64,
    pub sublayers: Vec<Sublayer>,
    animations: Vec<(String, LayerAnimation)>,
}

impl Default for ShapeLayer {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            position: Point::ZERO,
            rotation: 0.,
            path: BezPath::new(),
            line_width: 1.,
            stroke_color: None,
            fill_color: Some(Color::BLACK),
            opacity: 1.,
            stroke_start: 0.,
            stroke_end: 1.,
            sublayers: Vec::new(),
            animations: Vec::new(),
        }
    }
}

impl ShapeLayer {
    /// 背景和进度图层旋转 −π/2，使路径从12点钟方向开始
    pub fn rotated_to_twelve_oclock() -> Self {
        Self {
            rotation: -FRAC_PI_2,
            ..Self::default()
        }
    }

    /// Adds `animation` under `key`, replacing any animation already stored there.
    pub fn add_animation(&mut self, key: &str, animation: LayerAnimation) {
        self.remove_animation(key);
        self.animations.push((key.to_owned(), animation));
    }

    pub fn remove_animation(&mut self, key: &str) -> Option<LayerAnimation> {
        let idx = self.animations.iter().position(|(k, _)| k == key)?;
        Some(self.animations.remove(idx).1)
    }

    pub fn animation(&self, key: &str) -> Option<&LayerAnimation> {
        self.animations
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, anim)| anim)
    }

    pub fn animations(&self) -> impl Iterator<Item = (&str, &LayerAnimation)> {
        self.animations.iter().map(|(k, anim)| (k.as_str(), anim))
    }

    /// Adds `sublayer` unless this exact handle is already attached.
    pub fn add_sublayer_once(&mut self, sublayer: Sublayer) {
        if !self.sublayers.iter().any(|s| s.ptr_eq(&sublayer)) {
            self.sublayers.push(sublayer);
        }
    }
}

/// Container for additional content; holds no drawing of its own.
#[derive(Debug, Clone, Default)]
pub struct ContentLayer {
    pub bounds: Rect,
    pub position: Point,
    pub sublayers: Vec<Sublayer>,
}

impl ContentLayer {
    /// Adds `sublayer` unless this exact handle is already attached.
    ///
    /// Sublayers added later paint on top.
    pub fn add_sublayer_once(&mut self, sublayer: Sublayer) {
        if !self.sublayers.iter().any(|s| s.ptr_eq(&sublayer)) {
            self.sublayers.push(sublayer);
        }
    }
}

/// Single line of centered text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextLayer {
    pub bounds: Rect,
    pub position: Point,
    pub string: String,
    pub font_size: f64,
    pub foreground: Color,
    pub hidden: bool,
}

/// Particle emitter parameters; the host renders the particles.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterLayer {
    pub position: Point,
    pub birth_rate: f32,
    pub lifetime: f32,
    pub velocity: f64,
    pub velocity_range: f64,
    /// Spread of the emission cone, in radians.
    pub emission_range: f64,
    pub scale: f64,
    pub color: Color,
}

impl Default for EmitterLayer {
    fn default() -> Self {
        // "火花"粒子的默认参数
        Self {
            position: Point::ZERO,
            birth_rate: 0.,
            lifetime: 2.,
            velocity: 200.,
            velocity_range: 50.,
            emission_range: std::f64::consts::TAU,
            scale: 0.235,
            color: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Sublayer {
    Shape(Shared<ShapeLayer>),
    Text(Shared<TextLayer>),
    Emitter(Shared<EmitterLayer>),
}

impl Sublayer {
    pub fn ptr_eq(&self, other: &Sublayer) -> bool {
        match (self, other) {
            (Sublayer::Shape(a), Sublayer::Shape(b)) => Rc::ptr_eq(a, b),
            (Sublayer::Text(a), Sublayer::Text(b)) => Rc::ptr_eq(a, b),
            (Sublayer::Emitter(a), Sublayer::Emitter(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Sublayer {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

/// The three root layers handed to visual strategies.
#[derive(Debug)]
pub struct Layers {
    pub background: ShapeLayer,
    pub progress: ProgressLayer,
    pub additional_content: ContentLayer,
}

impl Layers {
    pub fn new() -> Self {
        Self {
            background: ShapeLayer::rotated_to_twelve_oclock(),
            progress: ProgressLayer::new(),
            additional_content: ContentLayer::default(),
        }
    }

    /// Sizes every root layer to `geometry.bounds` and centers it.
    pub fn layout(&mut self, geometry: &Geometry) {
        self.background.bounds = geometry.bounds;
        self.background.position = geometry.center;
        self.progress.shape.bounds = geometry.bounds;
        self.progress.shape.position = geometry.center;
        self.additional_content.bounds = geometry.bounds;
        self.additional_content.position = geometry.center;
    }
}

impl Default for Layers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::animation::AnimatedProperty;

    #[test]
    fn z_order_rejects_duplicates() {
        let err = ZOrder::new([
            LayerKind::Background,
            LayerKind::Progress,
            LayerKind::Background,
        ])
        .unwrap_err();
        assert!(matches!(err, crate::Error::DuplicateLayer(LayerKind::Background)));
    }

    #[test]
    fn z_index_follows_order() {
        let order = ZOrder::CONTENT_BELOW_PROGRESS;
        assert_eq!(order.z_index(LayerKind::Background), 0);
        assert_eq!(order.z_index(LayerKind::AdditionalContent), 1);
        assert_eq!(order.z_index(LayerKind::Progress), 2);
    }

    #[test]
    fn geometry_is_inscribed_in_shorter_side() {
        let geometry = Geometry::from_size(Size::new(200., 100.));
        assert_eq!(geometry.center, Point::new(100., 50.));
        assert_eq!(geometry.radius, 50.);
    }

    #[test]
    fn animation_keys_replace() {
        let mut layer = ShapeLayer::default();
        let spin = LayerAnimation::indeterminate_rotation(Duration::from_millis(1600));
        layer.add_animation("spin", spin.clone());
        layer.add_animation("spin", spin);
        assert_eq!(layer.animations().count(), 1);
        assert_eq!(
            layer.animation("spin").map(|a| a.property),
            Some(AnimatedProperty::RotationZ)
        );
        assert!(layer.remove_animation("spin").is_some());
        assert!(layer.animation("spin").is_none());
    }

    #[test]
    fn sublayers_are_added_once() {
        let text = Rc::new(RefCell::new(TextLayer::default()));
        let mut content = ContentLayer::default();
        content.add_sublayer_once(Sublayer::Text(text.clone()));
        content.add_sublayer_once(Sublayer::Text(text));
        assert_eq!(content.sublayers.len(), 1);
    }
}
