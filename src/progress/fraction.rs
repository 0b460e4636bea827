use std::cmp::Ordering;
use std::f64::consts::TAU;

/// Progress scalar clamped to `0.0..=1.0`.
///
/// Out-of-range inputs are clamped and NaN becomes `0.0`, so construction never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FractionCompleted(f64);

impl FractionCompleted {
    pub const ZERO: FractionCompleted = FractionCompleted(0.);
    pub const ONE: FractionCompleted = FractionCompleted(1.);

    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0., 1.))
    }

    pub fn raw(self) -> f64 {
        self.0
    }

    /// 对应的进度角度（弧度），满进度为 2π
    pub fn angle(self) -> f64 {
        self.0 * TAU
    }

    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle / TAU)
    }
}

impl From<f64> for FractionCompleted {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for FractionCompleted {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FractionCompleted {}

impl PartialOrd for FractionCompleted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FractionCompleted {
    fn cmp(&self, other: &Self) -> Ordering {
        // 构造时已排除NaN；total_cmp 会区分 -0.0 和 0.0，这里统一按数值比较
        (self.0 + 0.).total_cmp(&(other.0 + 0.))
    }
}
