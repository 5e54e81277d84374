//! Insertion points for split labels

use glam::{DVec2, DVec3};

use crate::types::{Angle, Height, OffsetFactor};

/// Displacement of a derived label relative to its source.
///
/// The distance is `height * factor`, taken along the source rotation.
pub fn displacement(height: Height, rotation: Angle, factor: OffsetFactor) -> DVec2 {
    let distance = height * factor;
    DVec2::from_angle(rotation.radians()) * distance.raw()
}

/// Insertion point of a derived label. Elevation is carried over unchanged.
pub fn place(origin: DVec3, height: Height, rotation: Angle, factor: OffsetFactor) -> DVec3 {
    origin + displacement(height, rotation, factor).extend(0.0)
}
