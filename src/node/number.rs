use std::fmt;

/// A JSON number.
///
/// The IEEE-754 value is the only stored state. The integer view is derived
/// from it on demand, so the two can never disagree after a mutation.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Number(f64);

impl Number {
    /// Creates a new number.
    #[inline]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Returns the floating-point value.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Returns the value clamped into `i32`.
    ///
    /// Out-of-range values saturate at `i32::MIN` / `i32::MAX`. NaN and the
    /// infinities map to `0`.
    pub fn as_int(&self) -> i32 {
        let value = self.0;
        if !value.is_finite() {
            0
        } else if value >= f64::from(i32::MAX) {
            i32::MAX
        } else if value <= f64::from(i32::MIN) {
            i32::MIN
        } else {
            value as i32
        }
    }

    /// Returns true unless the value is NaN or infinite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Self(f64::from(value))
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self(f64::from(value))
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self.0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::print::format_number(self.0))
    }
}
