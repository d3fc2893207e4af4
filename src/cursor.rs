use glam::Vec2;

use crate::Color;

/// A pen-style drawing target.
///
/// A cursor has a position, a heading in degrees (0 points along +X,
/// positive angles turn counterclockwise), a pen that is either up or
/// down, a color, and a pen width. Moving with the pen down leaves a
/// line behind.
///
/// The render worker is the only caller of these methods while it is
/// alive, so implementations need not guard against concurrent calls.
/// They only need to be `Send` so the worker thread can own them.
pub trait Cursor: Send {
    /// Lifts the pen. Subsequent moves do not draw.
    fn pen_up(&mut self);

    /// Lowers the pen. Subsequent moves draw.
    fn pen_down(&mut self);

    /// Moves to an absolute position without changing the heading.
    fn go_to(&mut self, position: Vec2);

    /// Moves `distance` units along the current heading.
    fn forward(&mut self, distance: f32);

    /// Turns counterclockwise by `degrees`.
    fn turn_left(&mut self, degrees: f32);

    /// Turns clockwise by `degrees`.
    fn turn_right(&mut self, degrees: f32) {
        self.turn_left(-degrees);
    }

    /// Sets the absolute heading in degrees.
    fn set_heading(&mut self, degrees: f32);

    fn set_color(&mut self, color: Color);

    fn set_pen_width(&mut self, width: f32);

    /// Erases everything and resizes the surface.
    fn clear(&mut self, width: u32, height: u32);
}

impl<C> Cursor for Box<C>
where
    C: Cursor + ?Sized,
{
    fn pen_up(&mut self) {
        (**self).pen_up()
    }

    fn pen_down(&mut self) {
        (**self).pen_down()
    }

    fn go_to(&mut self, position: Vec2) {
        (**self).go_to(position)
    }

    fn forward(&mut self, distance: f32) {
        (**self).forward(distance)
    }

    fn turn_left(&mut self, degrees: f32) {
        (**self).turn_left(degrees)
    }

    fn turn_right(&mut self, degrees: f32) {
        (**self).turn_right(degrees)
    }

    fn set_heading(&mut self, degrees: f32) {
        (**self).set_heading(degrees)
    }

    fn set_color(&mut self, color: Color) {
        (**self).set_color(color)
    }

    fn set_pen_width(&mut self, width: f32) {
        (**self).set_pen_width(width)
    }

    fn clear(&mut self, width: u32, height: u32) {
        (**self).clear(width, height)
    }
}
