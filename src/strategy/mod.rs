//! 视觉策略：决定三个根图层的样式以及进度路径的形状。
//!
//! 指示器负责图层的位置和尺寸，策略只设置样式属性、路径和子图层。
//! 部分策略还委托一个附加内容策略（百分比文字、停止按钮等）来填充附加内容图层。

use std::fmt::Debug;
use std::rc::Rc;

use kurbo::{BezPath, Point};

use crate::progress::State;
use crate::render::{Color, ContentLayer, Geometry, Layers, ZOrder};
use crate::{Error, Result};

mod basic;
mod content;
mod filled;
mod fireworks;
mod inset;

pub use basic::BasicStrategy;
pub use content::{CompositeContent, EmitterContent, PercentageContent, StopGlyphContent};
pub use filled::FilledStrategy;
pub use fireworks::FireworksStrategy;
pub use inset::InsetStrategy;

/// 不确定状态旋转动画的键
pub(crate) const INDETERMINATE_ANIMATION_KEY: &str = "indeterminate";

/// Styles the root layers and shapes the progress path.
pub trait VisualStrategy: Debug {
    /// Called on every layout pass.
    ///
    /// Must leave layer bounds and positions alone; only style, paths and sublayers.
    fn layout_layers(&self, layers: &mut Layers, center: Point, radius: f64);

    /// Called on every committed state change, before the angle is written.
    fn transition_layers(&self, layers: &mut Layers, state: &State, tint_color: Color);

    fn update_tint_color(&self, tint_color: Color, layers: &mut Layers, state: &State);

    /// Path representing `angle` radians of progress.
    ///
    /// Called once per frame while animating, so it must stay pure.
    fn progress_path(&self, center: Point, radius: f64, angle: f64) -> BezPath;

    /// Runs after every progress path replacement with the angle the path was built for.
    fn did_update_progress(&self, _layers: &mut Layers, _geometry: &Geometry, _angle: f64) {}

    /// Preferred paint order of the root layers.
    fn z_order(&self) -> ZOrder {
        ZOrder::default()
    }
}

/// Fills the additional content layer for strategies that delegate to one.
pub trait AdditionalContentStrategy: Debug {
    fn layout_additional_content(&self, layer: &mut ContentLayer, center: Point, radius: f64);

    fn transition_additional_content(&self, state: &State, tint_color: Color);

    fn update_tint_color(&self, tint_color: Color, state: &State);
}

/// Builds a visual strategy by name, with optional additional content.
///
/// Strategies: `basic`, `inset`, `filled`, `fireworks`. Content: see [`content_by_name`].
pub fn by_name(strategy: &str, content: Option<&str>) -> Result<Rc<dyn VisualStrategy>> {
    let content = content.map(content_by_name).transpose()?;

    let strategy: Rc<dyn VisualStrategy> = match strategy {
        "basic" => Rc::new(BasicStrategy::new(content.ok_or(
            Error::MissingAdditionalContent { strategy: "basic" },
        )?)),
        "inset" => Rc::new(InsetStrategy::new(content.ok_or(
            Error::MissingAdditionalContent { strategy: "inset" },
        )?)),
        "filled" => Rc::new(FilledStrategy::new(content)),
        "fireworks" => {
            if content.is_some() {
                warn!("the fireworks strategy ignores additional content");
            }
            Rc::new(FireworksStrategy::new())
        }
        other => return Err(Error::UnknownStrategy(other.to_owned())),
    };

    Ok(strategy)
}

/// Builds an additional content strategy by name.
///
/// `percentage`, `stop`, `emitter`, or several joined with `+` (e.g. `stop+emitter`), which
/// stacks them in order.
pub fn content_by_name(name: &str) -> Result<Rc<dyn AdditionalContentStrategy>> {
    if name.contains('+') {
        let children = name
            .split('+')
            .map(content_by_name)
            .collect::<Result<Vec<_>>>()?;
        return Ok(Rc::new(CompositeContent::new(children)));
    }

    let content: Rc<dyn AdditionalContentStrategy> = match name.trim() {
        "percentage" => Rc::new(PercentageContent::new()),
        "stop" => Rc::new(StopGlyphContent::new()),
        "emitter" => Rc::new(EmitterContent::new()),
        other => return Err(Error::UnknownContent(other.to_owned())),
    };
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LayerKind;

    #[test]
    fn strategies_requiring_content_fail_without_it() {
        let err = by_name("basic", None).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAdditionalContent { strategy: "basic" }
        ));
        assert!(by_name("inset", None).is_err());
        assert!(by_name("filled", None).is_ok());
        assert!(by_name("fireworks", None).is_ok());
    }

    #[test]
    fn unknown_names() {
        assert!(matches!(
            by_name("spiral", None),
            Err(Error::UnknownStrategy(name)) if name == "spiral"
        ));
        assert!(matches!(
            by_name("basic", Some("confetti")),
            Err(Error::UnknownContent(name)) if name == "confetti"
        ));
        assert!(matches!(
            content_by_name("stop+confetti"),
            Err(Error::UnknownContent(_))
        ));
    }

    #[test]
    fn inset_paints_content_below_progress() {
        let strategy = by_name("inset", Some("stop")).unwrap();
        assert_eq!(
            strategy.z_order().layers(),
            [
                LayerKind::Background,
                LayerKind::AdditionalContent,
                LayerKind::Progress
            ]
        );
        assert_eq!(by_name("filled", None).unwrap().z_order(), ZOrder::default());
    }

    #[test]
    fn error_messages() {
        insta::assert_snapshot!(
            by_name("inset", None).unwrap_err(),
            @"the inset strategy requires an additional content strategy"
        );
        insta::assert_snapshot!(
            content_by_name("sparkles").unwrap_err(),
            @"unknown additional content `sparkles`"
        );
    }
}
