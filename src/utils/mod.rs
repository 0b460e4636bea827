//! 实用工具模块，包含各种辅助函数。
//!
//! - 单调时钟（动画时间源）
//! - 几何计算（中心点、内切圆半径）
//! - 路径构造（整圆、圆弧、扇形、圆角矩形）

use std::f64::consts::TAU;
use std::time::Duration;

use kurbo::{Arc, BezPath, Point, Rect, RoundedRect, Shape, Size, Vec2};
use rustix::time::{clock_gettime, ClockId};

pub mod id;

/// 路径展平容差（逻辑像素）
pub const PATH_TOLERANCE: f64 = 0.1;

/// 获取单调递增时钟时间（不受系统时间调整影响）
pub fn get_monotonic_time() -> Duration {
    let ts = clock_gettime(ClockId::Monotonic);
    Duration::new(ts.tv_sec as u64, ts.tv_nsec as u32)
}

/// 计算矩形中心点
pub fn center(rect: Rect) -> Point {
    rect.center()
}

/// Radius of the circle inscribed in the shorter side of `size`.
pub fn inscribed_radius(size: Size) -> f64 {
    size.width.min(size.height).max(0.) * 0.5
}

/// 以`center`为圆心的完整圆路径（从角度0开始顺时针）
pub fn circle_path(center: Point, radius: f64) -> BezPath {
    arc_path(center, radius, 0., TAU)
}

/// 从`start_angle`扫过到`end_angle`的圆弧路径
///
/// 角度单位为弧度，在y轴向下的坐标系中沿顺时针方向增长。
/// 终止角小于起始角时绕一整圈后到达，与UIKit的`clockwise: true`一致。
pub fn arc_path(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> BezPath {
    let mut sweep = end_angle - start_angle;
    if sweep < 0. {
        sweep = sweep.rem_euclid(TAU);
    }

    let arc = Arc {
        center,
        radii: Vec2::new(radius, radius),
        start_angle,
        sweep_angle: sweep,
        x_rotation: 0.,
    };

    let mut path = BezPath::new();
    path.move_to(point_on_circle(center, radius, start_angle));
    path.extend(arc.append_iter(PATH_TOLERANCE));
    path
}

/// 扇形路径：圆心 → 圆弧 → 闭合
pub fn pie_path(center: Point, radius: f64, angle: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(center);
    path.line_to(point_on_circle(center, radius, 0.));

    if angle > 0. {
        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: 0.,
            sweep_angle: angle.min(TAU),
            x_rotation: 0.,
        };
        path.extend(arc.append_iter(PATH_TOLERANCE));
    }

    path.close_path();
    path
}

/// 圆角矩形路径
pub fn rounded_rect_path(rect: Rect, corner_radius: f64) -> BezPath {
    RoundedRect::from_rect(rect, corner_radius).to_path(PATH_TOLERANCE)
}

/// 圆上指定角度的点
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    center + Vec2::new(radius * angle.cos(), radius * angle.sin())
}
