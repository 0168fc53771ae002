//! Keyboard axis helper.
//!
//! The caller samples its input backend and feeds the two key states in;
//! nothing here reads global input.

/// A pair of opposing keys, e.g. left/right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyAxis {
    pub negative: bool,
    pub positive: bool,
}

impl KeyAxis {
    pub fn new(negative: bool, positive: bool) -> Self {
        Self { negative, positive }
    }

    /// -1, 0 or 1. Both keys held cancel out.
    pub fn value(&self) -> i8 {
        match (self.negative, self.positive) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    /// Combine a horizontal and vertical axis into a vector, normalized on diagonals.
    pub fn direction(horizontal: KeyAxis, vertical: KeyAxis) -> (f32, f32) {
        let x = horizontal.value() as f32;
        let y = vertical.value() as f32;
        if x != 0.0 && y != 0.0 {
            let k = std::f32::consts::FRAC_1_SQRT_2;
            (x * k, y * k)
        } else {
            (x, y)
        }
    }
}
