use crate::Cursor;

/// Something that can draw itself with a [`Cursor`].
///
/// Drawables are shared between the caller and the render worker, so
/// they must be immutable once placed in a painting. An error (or a panic)
/// from `draw` causes the worker to skip this item; the rest of the pass
/// is unaffected.
pub trait Drawable: Send + Sync + 'static {
    fn draw(&self, cursor: &mut dyn Cursor) -> anyhow::Result<()>;
}

impl<F> Drawable for F
where
    F: Fn(&mut dyn Cursor) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn draw(&self, cursor: &mut dyn Cursor) -> anyhow::Result<()> {
        self(cursor)
    }
}
