//! Tuple vector helpers.
//!
//! Components store positions and sizes as plain `(f32, f32)` tuples; these
//! traits add the few operations callers keep reaching for.

pub trait Vec2Ext {
    /// Clamp each axis into `[min, max]` independently.
    ///
    /// Never panics: a bound pair with `min > max` yields `max`.
    fn clamp_each(self, min: (f32, f32), max: (f32, f32)) -> Self;

    /// Widen to 3D with `z = 0`.
    fn to_vec3(self) -> (f32, f32, f32);
}

pub trait Vec3Ext {
    /// Drop the `z` component.
    fn to_vec2(self) -> (f32, f32);
}

impl Vec2Ext for (f32, f32) {
    fn clamp_each(self, min: (f32, f32), max: (f32, f32)) -> Self {
        (self.0.max(min.0).min(max.0), self.1.max(min.1).min(max.1))
    }

    fn to_vec3(self) -> (f32, f32, f32) {
        (self.0, self.1, 0.0)
    }
}

impl Vec3Ext for (f32, f32, f32) {
    fn to_vec2(self) -> (f32, f32) {
        (self.0, self.1)
    }
}
