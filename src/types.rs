//! Strongly-typed numeric primitives (zero-cost newtypes).
//!
//! Heights and rotations arrive from the drawing as raw `f64`s; they are
//! validated once at the boundary and carried typed from there on.

use std::fmt;
use std::ops::Mul;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

fn check_non_negative(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Distance in drawing units
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Length(pub f64);

impl Length {
    pub const ZERO: Length = Length(0.0);

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text height of a label, in drawing units. Never negative.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Height(f64);

impl Height {
    /// Create a Height with validation (rejects NaN, infinite and negative)
    #[inline]
    pub fn try_new(val: f64) -> Result<Height, NumericError> {
        check_non_negative(val).map(Height)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dimensionless placement multiplier for a derived label.
///
/// `0.0` keeps the label at the source insertion point; a positive factor
/// displaces it along the source rotation by `factor * height`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct OffsetFactor(f64);

impl OffsetFactor {
    pub const ZERO: OffsetFactor = OffsetFactor(0.0);

    /// Const-friendly, unchecked. Use `try_new` for user-provided values.
    #[inline]
    pub(crate) const fn new_unchecked(val: f64) -> OffsetFactor {
        OffsetFactor(val)
    }

    /// Create an OffsetFactor with validation (rejects NaN, infinite and negative)
    #[inline]
    pub fn try_new(val: f64) -> Result<OffsetFactor, NumericError> {
        check_non_negative(val).map(OffsetFactor)
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for OffsetFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Height * OffsetFactor = Length (the displacement distance)
impl Mul<OffsetFactor> for Height {
    type Output = Length;
    fn mul(self, rhs: OffsetFactor) -> Length {
        Length(self.0 * rhs.0)
    }
}

/// Rotation of a text entity, in radians (counter-clockwise from +X)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Create an Angle with validation (rejects NaN and infinite)
    #[inline]
    pub fn try_radians(val: f64) -> Result<Angle, NumericError> {
        check_finite(val).map(Angle)
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
