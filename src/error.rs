use crate::ItemId;

/// A drawable failed while the render worker was drawing it.
///
/// The worker skips the item and continues the pass. The error is
/// delivered to observers through [`RenderEvent::ItemFailed`](crate::RenderEvent::ItemFailed).
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("drawable {id} failed: {source:#}")]
    Failed {
        id: ItemId,
        #[source]
        source: anyhow::Error,
    },
    #[error("drawable {id} panicked: {message}")]
    Panicked { id: ItemId, message: String },
}

impl DrawError {
    /// The item that failed to draw.
    pub fn id(&self) -> ItemId {
        match self {
            DrawError::Failed { id, .. } | DrawError::Panicked { id, .. } => *id,
        }
    }
}

/// A shape's parameters cannot be drawn.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("a regular polygon needs at least 3 sides, got {0}")]
    TooFewSides(u32),
    #[error("{what} must be positive and finite, got {value}")]
    NonPositive { what: &'static str, value: f32 },
}
