use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{error::ShapeError, Color, Cursor, Drawable};

mod polygon;

pub use polygon::RegularPolygon;

/// A shape with a color, stroke width, and origin.
///
/// Shapes are plain values. The `with_*` methods return modified
/// copies, so a shape placed in a painting never changes underneath the
/// render worker.
///
/// Drawing a shape always resets the cursor: the pen is lifted, styled,
/// moved to the origin with heading 0, and lowered before the
/// kind-specific outline is traced.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    color: Color,
    stroke_width: f32,
    origin: Vec2,
    kind: ShapeKind,
}

impl Shape {
    /// Creates a black shape with a 1-unit stroke at the origin.
    pub fn new(kind: impl Into<ShapeKind>) -> Self {
        Self {
            color: Color::BLACK,
            stroke_width: 1.,
            origin: Vec2::ZERO,
            kind: kind.into(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn with_color(self, color: impl Into<Color>) -> Self {
        Self {
            color: color.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_stroke_width(self, stroke_width: f32) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }

    #[must_use]
    pub fn with_origin(self, origin: Vec2) -> Self {
        Self { origin, ..self }
    }

    #[must_use]
    pub fn with_kind(self, kind: impl Into<ShapeKind>) -> Self {
        Self {
            kind: kind.into(),
            ..self
        }
    }

    /// Checks that the shape's parameters can be traced.
    pub fn validate(&self) -> Result<(), ShapeError> {
        positive("stroke width", self.stroke_width)?;
        match self.kind {
            ShapeKind::Circle(circle) => positive("circle radius", circle.radius),
            ShapeKind::Rectangle(rect) => {
                positive("rectangle width", rect.width)?;
                positive("rectangle height", rect.height)
            }
            ShapeKind::RegularPolygon(polygon) => polygon.validate(),
        }
    }
}

impl Drawable for Shape {
    fn draw(&self, cursor: &mut dyn Cursor) -> anyhow::Result<()> {
        self.validate()?;

        cursor.pen_up();
        cursor.set_color(self.color);
        cursor.set_pen_width(self.stroke_width);
        cursor.go_to(self.origin);
        cursor.set_heading(0.);
        cursor.pen_down();

        match self.kind {
            ShapeKind::Circle(circle) => circle.to_polygon().trace(cursor),
            ShapeKind::Rectangle(rect) => rect.trace(cursor),
            ShapeKind::RegularPolygon(polygon) => polygon.trace(cursor),
        }
        Ok(())
    }
}

/// The outline a [`Shape`] traces.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle(Circle),
    Rectangle(Rectangle),
    RegularPolygon(RegularPolygon),
}

impl From<Circle> for ShapeKind {
    fn from(circle: Circle) -> Self {
        ShapeKind::Circle(circle)
    }
}

impl From<Rectangle> for ShapeKind {
    fn from(rect: Rectangle) -> Self {
        ShapeKind::Rectangle(rect)
    }
}

impl From<RegularPolygon> for ShapeKind {
    fn from(polygon: RegularPolygon) -> Self {
        ShapeKind::RegularPolygon(polygon)
    }
}

/// A circle centered on the shape's origin.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[must_use]
    pub fn with_radius(self, radius: f32) -> Self {
        Self { radius }
    }

    /// The polygon a circle is traced as. Uses roughly one side per four
    /// units of circumference, with at least 12 sides.
    fn to_polygon(self) -> RegularPolygon {
        let circumference = std::f32::consts::TAU * self.radius;
        let sides = ((circumference / 4.).ceil() as u32).clamp(12, 360);
        RegularPolygon::new()
            .with_sides(sides)
            .with_radius(self.radius)
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new(1.)
    }
}

/// A rectangle whose upper-left corner is the shape's origin.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    width: f32,
    height: f32,
}

impl Rectangle {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn with_width(self, width: f32) -> Self {
        Self { width, ..self }
    }

    #[must_use]
    pub fn with_height(self, height: f32) -> Self {
        Self { height, ..self }
    }

    fn trace(&self, cursor: &mut dyn Cursor) {
        cursor.forward(self.width);
        cursor.turn_right(90.);
        cursor.forward(self.height);
        cursor.turn_right(90.);
        cursor.forward(self.width);
        cursor.turn_right(90.);
        cursor.forward(self.height);
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new(1., 1.)
    }
}

fn positive(what: &'static str, value: f32) -> Result<(), ShapeError> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(ShapeError::NonPositive { what, value })
    }
}
