use glam::{vec2, Vec2};

use crate::{Color, Command, CommandLog, Cursor};

/// A [`Cursor`] that resolves pen movement into absolute
/// lines and records everything into a [`CommandLog`].
///
/// It does not rasterize anything. Use it to inspect what a painting
/// draws, or feed the log to a real surface afterwards.
pub struct RecordingCanvas {
    log: CommandLog,
    state: PenState,
}

impl RecordingCanvas {
    /// Creates a canvas recording into a fresh log.
    pub fn new() -> Self {
        Self::with_log(CommandLog::new())
    }

    /// Creates a canvas recording into an existing log.
    pub fn with_log(log: CommandLog) -> Self {
        Self {
            log,
            state: PenState::default(),
        }
    }

    /// Returns a handle to the log this canvas records into.
    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn heading(&self) -> f32 {
        self.state.heading
    }

    pub fn is_pen_down(&self) -> bool {
        self.state.pen_down
    }

    fn move_pen(&mut self, to: Vec2) {
        let from = self.state.position;
        self.state.position = to;
        if self.state.pen_down {
            self.log.push(Command::Line {
                from,
                to,
                color: self.state.color,
                width: self.state.pen_width,
            });
        } else {
            self.log.push(Command::MoveTo(to));
        }
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor for RecordingCanvas {
    fn pen_up(&mut self) {
        self.state.pen_down = false;
        self.log.push(Command::PenUp);
    }

    fn pen_down(&mut self) {
        self.state.pen_down = true;
        self.log.push(Command::PenDown);
    }

    fn go_to(&mut self, position: Vec2) {
        self.move_pen(position);
    }

    fn forward(&mut self, distance: f32) {
        let radians = self.state.heading.to_radians();
        let to = self.state.position + vec2(radians.cos(), radians.sin()) * distance;
        self.move_pen(to);
    }

    fn turn_left(&mut self, degrees: f32) {
        self.state.heading = (self.state.heading + degrees).rem_euclid(360.);
    }

    fn set_heading(&mut self, degrees: f32) {
        self.state.heading = degrees.rem_euclid(360.);
        self.log.push(Command::SetHeading(degrees));
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
        self.log.push(Command::SetColor(color));
    }

    fn set_pen_width(&mut self, width: f32) {
        self.state.pen_width = width;
        self.log.push(Command::SetPenWidth(width));
    }

    fn clear(&mut self, width: u32, height: u32) {
        self.log.push(Command::Clear { width, height });
    }
}

#[derive(Debug, Copy, Clone)]
struct PenState {
    position: Vec2,
    heading: f32,
    pen_down: bool,
    color: Color,
    pen_width: f32,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            heading: 0.,
            pen_down: true,
            color: Color::BLACK,
            pen_width: 1.,
        }
    }
}
