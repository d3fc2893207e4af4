use std::sync::Arc;

use glam::Vec2;
use parking_lot::Mutex;

use crate::Color;

/// A single operation observed by a [`RecordingCanvas`](crate::RecordingCanvas).
///
/// A draw operation involves a stream of `Command`s. Pen movement is
/// resolved into absolute coordinates: every move issued with the pen
/// down is recorded as a `Line`, every move with the pen up as a `MoveTo`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    /// The surface was erased and resized.
    Clear { width: u32, height: u32 },
    PenUp,
    PenDown,
    /// The pen moved without drawing.
    MoveTo(Vec2),
    /// The pen moved while down, drawing a line.
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    SetHeading(f32),
    SetColor(Color),
    SetPenWidth(f32),
}

/// A shared, append-only log of [`Command`]s.
///
/// Cloning a `CommandLog` creates a new handle to the same log, so
/// another thread can read what the canvas has recorded while the render
/// worker keeps writing to it.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Arc<Mutex<Vec<Command>>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, command: Command) {
        self.commands.lock().push(command);
    }

    /// Copies out every command recorded so far.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }

    /// Copies out the commands recorded since the most recent `Clear`,
    /// i.e. what is currently visible on the surface.
    pub fn since_last_clear(&self) -> Vec<Command> {
        let commands = self.commands.lock();
        let start = commands
            .iter()
            .rposition(|c| matches!(c, Command::Clear { .. }))
            .map_or(0, |i| i + 1);
        commands[start..].to_vec()
    }

    /// Removes and returns every command recorded so far.
    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock())
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .lock()
            .iter()
            .filter(|c| matches!(c, Command::Clear { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_last_clear_skips_erased_output() {
        let log = CommandLog::new();
        log.push(Command::SetHeading(1.));
        log.push(Command::Clear {
            width: 10,
            height: 10,
        });
        log.push(Command::SetHeading(2.));
        log.push(Command::Clear {
            width: 10,
            height: 10,
        });
        log.push(Command::SetHeading(3.));

        assert_eq!(log.since_last_clear(), vec![Command::SetHeading(3.)]);
        assert_eq!(log.clear_count(), 2);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn handles_share_one_log() {
        let log = CommandLog::new();
        let other = log.clone();
        other.push(Command::PenUp);

        assert_eq!(log.take(), vec![Command::PenUp]);
        assert!(other.is_empty());
    }
}
