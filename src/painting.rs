use std::{sync::Arc, time::Duration};

use glam::Vec2;

use crate::{
    render::{RenderCoordinator, RenderStatus},
    settings::{RemovalPolicy, Settings},
    Cursor, Drawable, Generation, Item, ItemId, RenderEvent, Scene, Target,
};

/// Builder for a [`Painting`].
pub struct PaintingBuilder {
    width: u32,
    height: u32,
    canvas: Box<dyn Cursor>,
    scene: Scene,
    settings: Settings,
}

impl PaintingBuilder {
    /// Adds an item to the initial scene.
    pub fn item(mut self, drawable: impl Drawable) -> Self {
        self.scene.append(Arc::new(drawable));
        self
    }

    /// Adds several items of the same type to the initial scene.
    pub fn items<D: Drawable>(mut self, drawables: impl IntoIterator<Item = D>) -> Self {
        for drawable in drawables {
            self.scene.append(Arc::new(drawable));
        }
        self
    }

    /// Adds an already shared item to the initial scene.
    pub fn shared_item(mut self, drawable: Arc<dyn Drawable>) -> Self {
        self.scene.append(drawable);
        self
    }

    /// Sets where the cursor rests between passes, relative to the
    /// bottom-right corner of the painting.
    ///
    /// The default is `(100, 100)`, which keeps the cursor out of view.
    pub fn park_offset(mut self, offset: Vec2) -> Self {
        self.settings.park_offset = offset;
        self
    }

    /// Sets the name of the render worker thread.
    ///
    /// The default is `easel-render`.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.settings.thread_name = name.into();
        self
    }

    /// Sets how removals during a pass are reconciled.
    ///
    /// The default is [`RemovalPolicy::AlwaysRedraw`].
    pub fn removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.settings.removal_policy = policy;
        self
    }

    /// Builds the painting. Nothing is drawn until a render is requested.
    pub fn build(self) -> Painting {
        Painting {
            coordinator: RenderCoordinator::new(
                self.width,
                self.height,
                self.scene,
                self.canvas,
                self.settings,
            ),
        }
    }
}

/// An ordered collection of drawables rendered onto a canvas by a
/// background worker thread.
///
/// All request methods return as soon as the request is recorded. The
/// worker is started lazily and retires once everything is drawn.
/// Mutations made while a pass is running are picked up by that pass:
/// appends are drawn after the items already queued, without clearing
/// the canvas, while full renders and removals make the worker start
/// over on a cleared canvas.
///
/// Dropping a `Painting` stops its worker.
pub struct Painting {
    coordinator: RenderCoordinator,
}

impl Painting {
    /// Creates a painting of the given size with an initial list of items.
    pub fn new<D: Drawable>(
        width: u32,
        height: u32,
        items: impl IntoIterator<Item = D>,
        canvas: impl Cursor + 'static,
    ) -> Self {
        Self::builder(width, height, canvas).items(items).build()
    }

    pub fn builder(width: u32, height: u32, canvas: impl Cursor + 'static) -> PaintingBuilder {
        PaintingBuilder {
            width,
            height,
            canvas: Box::new(canvas),
            scene: Scene::new(),
            settings: Settings::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.coordinator.width()
    }

    pub fn height(&self) -> u32 {
        self.coordinator.height()
    }

    /// Clears the canvas and draws every item from scratch.
    ///
    /// A pass already in progress is abandoned at its next item boundary.
    pub fn request_full_render(&self) {
        self.coordinator.request_full_render();
    }

    /// Appends an item and gets it drawn.
    ///
    /// If a pass is running, the item is drawn at the end of that pass.
    /// Otherwise this starts a full render.
    pub fn request_append(&self, drawable: impl Drawable) -> ItemId {
        self.request_append_shared(Arc::new(drawable))
    }

    /// Like [`request_append`](Self::request_append), for an already
    /// shared drawable.
    pub fn request_append_shared(&self, drawable: Arc<dyn Drawable>) -> ItemId {
        self.coordinator.request_append(drawable)
    }

    /// Removes an item by identity or index and gets the canvas updated.
    ///
    /// Returns the removed item's identity, or `None` if nothing matched,
    /// in which case no render is requested.
    pub fn request_remove(&self, target: impl Into<Target>) -> Option<ItemId> {
        self.coordinator.request_remove(target.into())
    }

    /// Stops the worker at its next item boundary.
    ///
    /// The worker parks the cursor before exiting. The next request
    /// starts a new worker.
    pub fn stop(&self) {
        self.coordinator.stop();
    }

    /// Replaces the canvas the painting draws to.
    ///
    /// If a pass is running, the painting is redrawn on the new canvas.
    /// Otherwise the new canvas is used by the next render.
    pub fn set_canvas(&self, canvas: impl Cursor + 'static) {
        self.coordinator.set_canvas(Box::new(canvas));
    }

    pub fn status(&self) -> RenderStatus {
        self.coordinator.status()
    }

    pub fn is_idle(&self) -> bool {
        self.status() == RenderStatus::Idle
    }

    pub fn generation(&self) -> Generation {
        self.coordinator.generation()
    }

    /// Returns the current items in order.
    pub fn items(&self) -> Vec<Item> {
        self.coordinator.snapshot()
    }

    pub fn len(&self) -> usize {
        self.coordinator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a stream of render progress events.
    ///
    /// Events are buffered without bound; drop the receiver to unsubscribe.
    pub fn subscribe(&self) -> flume::Receiver<RenderEvent> {
        self.coordinator.subscribe()
    }

    /// Blocks until the render worker has exited and the cursor is parked.
    pub fn wait_idle(&self) {
        self.coordinator.wait_idle();
    }

    /// Like [`wait_idle`](Self::wait_idle), giving up after `timeout`.
    /// Returns whether the painting became idle.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        self.coordinator.wait_idle_timeout(timeout)
    }
}

impl Drop for Painting {
    fn drop(&mut self) {
        self.coordinator.stop();
    }
}
