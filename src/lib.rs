//! Asynchronous rendering of an editable list of shapes
//! onto a pen-style canvas.
//!
//! A [`Painting`] owns an ordered [`Scene`] of [`Drawable`]s and a
//! [`Cursor`] to draw them with. Drawing happens on a background worker
//! thread. Callers may append, remove, or request a full redraw at any
//! time without waiting for the worker; appends made mid-pass are drawn
//! incrementally, anything else restarts the pass on a cleared canvas.

mod canvas;
mod color;
mod command;
mod cursor;
mod drawable;
pub mod error;
mod event;
mod painting;
mod render;
mod scene;
mod settings;
mod shape;

pub use canvas::RecordingCanvas;
pub use color::Color;
pub use command::{Command, CommandLog};
pub use cursor::Cursor;
pub use drawable::Drawable;
pub use event::{AbortReason, RenderEvent};
pub use painting::{Painting, PaintingBuilder};
pub use render::{Generation, RenderStatus};
pub use scene::{Item, ItemId, Scene, Target};
pub use settings::RemovalPolicy;
pub use shape::{Circle, Rectangle, RegularPolygon, Shape, ShapeKind};

pub use glam::{vec2, Vec2};
