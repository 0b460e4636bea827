//! 指示器配置：过渡动画参数、初始着色与图层绘制顺序。
//!
//! 配置只在构造时传入，不读写文件，也不持久化。

use crate::animation::Curve;
use crate::render::{Color, ZOrder};

/// Duration of an animated progress transition in the reference behavior.
pub const DEFAULT_TRANSITION_MS: u32 = 400;

/// 进度角度过渡动画的参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    /// 关闭后每个动画过渡立即完成（仍会产生描述符，并在下一帧结束）
    pub off: bool,
    pub duration_ms: u32,
    pub curve: Curve,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            off: false,
            duration_ms: DEFAULT_TRANSITION_MS,
            curve: Curve::Linear,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressConfig {
    pub transition: TransitionConfig,
    pub tint_color: Color,
    /// Overrides the strategy's preferred paint order.
    pub z_order: Option<ZOrder>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            transition: TransitionConfig::default(),
            tint_color: Color::SYSTEM_BLUE,
            z_order: None,
        }
    }
}
