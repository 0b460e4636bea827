//! 圆形进度指示器库。
//!
//! 指示器由三个图层组成（背景、进度、附加内容），外观由注入的 [`VisualStrategy`] 决定。
//! 带动画的进度变化会产生一个角度过渡；有过渡进行时，协调器持有一个逐帧回调，
//! 每帧按当前呈现的角度重建进度路径，最后一个过渡结束时释放回调。

#[macro_use]
extern crate tracing;

pub mod animation;
pub mod cli;
pub mod config;
pub mod error;
pub mod frame;
pub mod frame_clock;
pub mod progress;
pub mod render;
pub mod strategy;
pub mod utils;

#[cfg(test)]
mod tests;

pub use animation::Clock;
pub use config::{ProgressConfig, TransitionConfig};
pub use error::{Error, Result};
pub use progress::{FractionCompleted, ProgressIndicator, State};
pub use render::Color;
pub use strategy::{AdditionalContentStrategy, VisualStrategy};
