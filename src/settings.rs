use glam::{vec2, Vec2};

/// What the coordinator does when an item is removed while a pass is
/// in progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Every removal clears the canvas and redraws the remaining items.
    #[default]
    AlwaysRedraw,
    /// A removed item that the current pass has not reached yet is
    /// dropped from the pass's queue without a redraw. Items that may
    /// already be on the canvas still force a redraw.
    SkipPending,
}

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(crate) park_offset: Vec2,
    pub(crate) thread_name: String,
    pub(crate) removal_policy: RemovalPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            park_offset: vec2(100., 100.),
            thread_name: "easel-render".to_owned(),
            removal_policy: RemovalPolicy::default(),
        }
    }
}
