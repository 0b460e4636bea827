//! 附加内容策略：百分比文字、停止按钮、粒子发射器以及它们的组合。
//!
//! 每个策略持有自己创建的子图层句柄，首次布局时挂到附加内容图层上，
//! 之后在状态或着色变化时直接更新子图层。

mod composite;
mod emitter;
mod percentage;
mod stop_glyph;

pub use composite::CompositeContent;
pub use emitter::EmitterContent;
pub use percentage::PercentageContent;
pub use stop_glyph::StopGlyphContent;
