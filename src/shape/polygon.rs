use serde::{Deserialize, Serialize};

use crate::{error::ShapeError, Cursor};

/// A regular polygon centered on the shape's origin.
///
/// `angle` is the direction, in degrees, from the center to the first
/// vertex. `radius` is the distance from the center to every vertex.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegularPolygon {
    sides: u32,
    angle: f32,
    radius: f32,
}

impl RegularPolygon {
    /// A pentagon with radius 10.
    pub fn new() -> Self {
        Self {
            sides: 5,
            angle: 0.,
            radius: 10.,
        }
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn with_sides(self, sides: u32) -> Self {
        Self { sides, ..self }
    }

    #[must_use]
    pub fn with_angle(self, angle: f32) -> Self {
        Self { angle, ..self }
    }

    #[must_use]
    pub fn with_radius(self, radius: f32) -> Self {
        Self { radius, ..self }
    }

    /// Exterior angle in degrees.
    fn turn_angle(&self) -> f32 {
        360. / self.sides as f32
    }

    /// Chord between two adjacent vertices.
    fn side_length(&self) -> f32 {
        2. * self.radius * (self.turn_angle().to_radians() / 2.).sin()
    }

    pub(crate) fn validate(&self) -> Result<(), ShapeError> {
        if self.sides < 3 {
            return Err(ShapeError::TooFewSides(self.sides));
        }
        if !(self.radius.is_finite() && self.radius > 0.) {
            return Err(ShapeError::NonPositive {
                what: "polygon radius",
                value: self.radius,
            });
        }
        Ok(())
    }

    /// Traces the outline, starting from the center with heading 0.
    pub(crate) fn trace(&self, cursor: &mut dyn Cursor) {
        let turn = self.turn_angle();
        let side = self.side_length();

        cursor.turn_left(self.angle);
        cursor.pen_up();
        cursor.forward(self.radius);
        cursor.turn_left(90. + turn / 2.);
        cursor.pen_down();
        for _ in 0..self.sides {
            cursor.forward(side);
            cursor.turn_left(turn);
        }
    }
}

impl Default for RegularPolygon {
    fn default() -> Self {
        Self::new()
    }
}
