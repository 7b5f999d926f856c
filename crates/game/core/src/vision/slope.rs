use std::cmp::Ordering;

/// Rational slope `y / x` with a strictly positive denominator.
///
/// Comparison cross-multiplies, so `1/2` and `2/4` are equal.
#[derive(Clone, Copy, Debug)]
pub struct Slope {
    pub y: i32,
    pub x: i32,
}

impl Slope {
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn compare(&self, other: &Self) -> i64 {
        i64::from(self.y) * i64::from(other.x) - i64::from(self.x) * i64::from(other.y)
    }
}

impl PartialEq for Slope {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == 0
    }
}

impl Eq for Slope {}

impl PartialOrd for Slope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slope {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other).cmp(&0)
    }
}
