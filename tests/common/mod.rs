#![allow(dead_code)]

use std::{
    sync::Arc,
    thread::{self, ThreadId},
    time::Duration,
};

use easel::{Color, Command, CommandLog, Cursor, Drawable, RecordingCanvas, Vec2};
use flume::{Receiver, Sender};
use parking_lot::Mutex;

pub const TIMEOUT: Duration = Duration::from_secs(10);

pub fn init_logging() {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .init()
        .ok();
}

/// Draws by setting the heading to a recognizable value.
pub struct Marker(pub u32);

impl Drawable for Marker {
    fn draw(&self, cursor: &mut dyn Cursor) -> anyhow::Result<()> {
        cursor.set_heading(self.0 as f32);
        Ok(())
    }
}

/// A marker that blocks inside `draw` until released.
pub struct Gate {
    marker: u32,
    entered: Sender<()>,
    release: Receiver<()>,
}

impl Drawable for Gate {
    fn draw(&self, cursor: &mut dyn Cursor) -> anyhow::Result<()> {
        self.entered.send(()).ok();
        self.release.recv_timeout(TIMEOUT)?;
        cursor.set_heading(self.marker as f32);
        Ok(())
    }
}

pub struct GateHandle {
    entered: Receiver<()>,
    release: Sender<()>,
}

impl GateHandle {
    /// Waits until the worker is inside the gate's `draw`.
    pub fn wait_entered(&self) {
        self.entered
            .recv_timeout(TIMEOUT)
            .expect("worker never reached the gate");
    }

    /// Lets one `draw` call through.
    pub fn release(&self) {
        self.release.send(()).unwrap();
    }
}

pub fn gate(marker: u32) -> (Gate, GateHandle) {
    let (entered_tx, entered_rx) = flume::unbounded();
    let (release_tx, release_rx) = flume::unbounded();
    (
        Gate {
            marker,
            entered: entered_tx,
            release: release_rx,
        },
        GateHandle {
            entered: entered_rx,
            release: release_tx,
        },
    )
}

/// The markers drawn in the given commands, in order.
pub fn markers(commands: &[Command]) -> Vec<u32> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::SetHeading(h) => Some(*h as u32),
            _ => None,
        })
        .collect()
}

/// The markers currently visible on the canvas.
pub fn visible(log: &CommandLog) -> Vec<u32> {
    markers(&log.since_last_clear())
}

/// A recording canvas that also notes which thread issued each call.
pub struct ThreadTrackingCanvas {
    inner: RecordingCanvas,
    threads: Arc<Mutex<Vec<ThreadId>>>,
}

impl ThreadTrackingCanvas {
    pub fn new() -> (Self, CommandLog, Arc<Mutex<Vec<ThreadId>>>) {
        let inner = RecordingCanvas::new();
        let log = inner.log();
        let threads = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                inner,
                threads: Arc::clone(&threads),
            },
            log,
            threads,
        )
    }

    fn track(&mut self) -> &mut RecordingCanvas {
        self.threads.lock().push(thread::current().id());
        thread::yield_now();
        &mut self.inner
    }
}

impl Cursor for ThreadTrackingCanvas {
    fn pen_up(&mut self) {
        self.track().pen_up()
    }

    fn pen_down(&mut self) {
        self.track().pen_down()
    }

    fn go_to(&mut self, position: Vec2) {
        self.track().go_to(position)
    }

    fn forward(&mut self, distance: f32) {
        self.track().forward(distance)
    }

    fn turn_left(&mut self, degrees: f32) {
        self.track().turn_left(degrees)
    }

    fn set_heading(&mut self, degrees: f32) {
        self.track().set_heading(degrees)
    }

    fn set_color(&mut self, color: Color) {
        self.track().set_color(color)
    }

    fn set_pen_width(&mut self, width: f32) {
        self.track().set_pen_width(width)
    }

    fn clear(&mut self, width: u32, height: u32) {
        self.track().clear(width, height)
    }
}

/// Checks that no two threads ever interleaved their calls: once a
/// thread has been followed by another, it never appears again.
pub fn assert_no_interleaving(threads: &[ThreadId]) {
    let mut finished: Vec<ThreadId> = Vec::new();
    let mut current: Option<ThreadId> = None;
    for &thread in threads {
        if current == Some(thread) {
            continue;
        }
        assert!(
            !finished.contains(&thread),
            "thread {:?} drew again after another worker took over",
            thread
        );
        if let Some(previous) = current.replace(thread) {
            finished.push(previous);
        }
    }
}
