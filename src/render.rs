//! Render coordination.
//!
//! All mutable state lives in a single [`State`] behind one mutex:
//! the scene, the generation counter, the worker phase, and the queue
//! of the pass in progress. Callers hold the lock only long enough to
//! record a request. The worker holds it only while deciding its next
//! step, never while calling into the canvas.
//!
//! A pass is tagged with the generation that was current when it
//! started. Anything that invalidates what is on the canvas bumps the
//! generation; the worker compares generations before every item and
//! starts over when they differ. Appends during a pass skip the bump and
//! go straight onto the pass's queue.

use std::{
    collections::VecDeque,
    fmt::{self, Display},
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::{
    error::DrawError,
    event::{AbortReason, Observers, RenderEvent},
    settings::{RemovalPolicy, Settings},
    Cursor, Drawable, Item, ItemId, Scene, Target,
};

mod worker;

/// A version token identifying the desired contents of the canvas.
///
/// Strictly increases whenever in-flight drawing becomes stale.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Whether a render worker is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderStatus {
    Idle,
    /// A worker is drawing the pass started at `generation`, or is about
    /// to start one.
    Rendering { generation: Generation },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct WorkerId(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Rendering { worker: WorkerId },
}

/// The queue of one pass.
struct Pass {
    generation: Generation,
    /// Items not yet handed to the worker. The item being drawn has
    /// already been popped.
    pending: VecDeque<Item>,
}

impl Pass {
    fn new(generation: Generation, snapshot: Vec<Item>) -> Self {
        Self {
            generation,
            pending: snapshot.into(),
        }
    }

    fn remove_pending(&mut self, id: ItemId) -> bool {
        match self.pending.iter().position(|item| item.id() == id) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }
}

/// What the worker does next, decided under the state lock.
enum Step {
    /// The worker no longer owns the painting.
    Stop,
    /// Clear the canvas; a fresh pass at this generation has been queued.
    Restart(Generation),
    Draw(Item, Generation),
    /// The queue ran dry with no newer generation pending. The coordinator
    /// is already idle.
    Retire(Generation),
}

struct State {
    scene: Scene,
    generation: Generation,
    phase: Phase,
    pass: Option<Pass>,
    next_worker: u64,
    /// Worker threads that have been spawned and not yet exited,
    /// including stopped or retired ones still parking the cursor.
    live_workers: usize,
    replacement_canvas: Option<Box<dyn Cursor>>,
    observers: Observers,
}

impl State {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            generation: Generation::default(),
            phase: Phase::Idle,
            pass: None,
            next_worker: 0,
            live_workers: 0,
            replacement_canvas: None,
            observers: Observers::default(),
        }
    }

    fn is_active(&self, worker: WorkerId) -> bool {
        self.phase == Phase::Rendering { worker }
    }

    fn is_rendering(&self) -> bool {
        matches!(self.phase, Phase::Rendering { .. })
    }

    fn bump_generation(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }

    /// The pass in progress, if it is still current.
    fn current_pass(&mut self) -> Option<&mut Pass> {
        let generation = self.generation;
        self.pass
            .as_mut()
            .filter(|pass| pass.generation == generation)
    }

    fn next_step(&mut self, worker: WorkerId) -> Step {
        if !self.is_active(worker) {
            return Step::Stop;
        }

        let generation = self.generation;
        if let Some(pass) = self.current_pass() {
            if let Some(item) = pass.pending.pop_front() {
                return Step::Draw(item, generation);
            }
        } else {
            if let Some(stale) = self.pass.take() {
                log::debug!(
                    "Pass {} superseded by {} with {} items left",
                    stale.generation,
                    generation,
                    stale.pending.len()
                );
                self.observers.emit(RenderEvent::PassAborted {
                    generation: stale.generation,
                    reason: AbortReason::Superseded,
                });
            }
            self.pass = Some(Pass::new(generation, self.scene.snapshot()));
            self.observers
                .emit(RenderEvent::PassStarted { generation });
            return Step::Restart(generation);
        }

        // Deciding to retire happens under the same lock an append takes
        // to enqueue, so an append either lands in the queue above or
        // sees `Idle` and spawns a new worker.
        self.phase = Phase::Idle;
        self.pass = None;
        self.observers
            .emit(RenderEvent::PassCompleted { generation });
        Step::Retire(generation)
    }

    /// Adds a drawable to the scene and, if a pass is current, to the end
    /// of its queue. With no current pass the next snapshot picks it up.
    fn append(&mut self, drawable: Arc<dyn Drawable>) -> ItemId {
        let id = self.scene.append(drawable);
        let item = self.scene.last().cloned();
        if let (Some(item), Some(pass)) = (item, self.current_pass()) {
            pass.pending.push_back(item);
            log::trace!("Queued item {} onto pass {}", id, pass.generation);
        }
        id
    }

    fn finish_item(&mut self, id: ItemId, generation: Generation, result: Result<(), DrawError>) {
        match result {
            Ok(()) => {
                log::trace!("Drew item {} in pass {}", id, generation);
                self.observers
                    .emit(RenderEvent::ItemDrawn { id, generation });
            }
            Err(e) => {
                log::warn!("Skipping item in pass {}: {}", generation, e);
                self.observers.emit(RenderEvent::ItemFailed {
                    generation,
                    error: Arc::new(e),
                });
            }
        }
    }
}

struct Shared {
    state: Mutex<State>,
    /// Signalled whenever a worker thread exits.
    retired: Condvar,
    /// The drawing target. A worker locks it for its whole lifetime,
    /// so a newly spawned worker waits here until its predecessor has
    /// parked the cursor.
    canvas: Mutex<Box<dyn Cursor>>,
    width: u32,
    height: u32,
    settings: Settings,
}

/// Owns the render worker of one painting and the state it shares
/// with callers.
pub(crate) struct RenderCoordinator {
    shared: Arc<Shared>,
}

impl RenderCoordinator {
    pub fn new(
        width: u32,
        height: u32,
        scene: Scene,
        canvas: Box<dyn Cursor>,
        settings: Settings,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::new(scene)),
                retired: Condvar::new(),
                canvas: Mutex::new(canvas),
                width,
                height,
                settings,
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.shared.width
    }

    pub fn height(&self) -> u32 {
        self.shared.height
    }

    pub fn request_full_render(&self) {
        let mut state = self.shared.state.lock();
        self.full_render(&mut state);
    }

    pub fn request_append(&self, drawable: Arc<dyn Drawable>) -> ItemId {
        let mut state = self.shared.state.lock();
        let id = state.append(drawable);
        if !state.is_rendering() {
            self.full_render(&mut state);
        }
        id
    }

    pub fn request_remove(&self, target: Target) -> Option<ItemId> {
        let mut state = self.shared.state.lock();
        let id = state.scene.remove(target)?.id();

        if !state.is_rendering() {
            self.full_render(&mut state);
            return Some(id);
        }

        if self.shared.settings.removal_policy == RemovalPolicy::SkipPending {
            if let Some(pass) = state.current_pass() {
                if pass.remove_pending(id) {
                    log::trace!("Dropped pending item {} from pass {}", id, pass.generation);
                    return Some(id);
                }
            }
        }

        let generation = state.bump_generation();
        log::debug!("Removal of item {} forces redraw at {}", id, generation);
        Some(id)
    }

    pub fn stop(&self) {
        let mut state = self.shared.state.lock();
        if !state.is_rendering() {
            return;
        }

        log::debug!("Stopping render worker");
        state.phase = Phase::Idle;
        if let Some(pass) = state.pass.take() {
            state.observers.emit(RenderEvent::PassAborted {
                generation: pass.generation,
                reason: AbortReason::Stopped,
            });
        }
    }

    pub fn set_canvas(&self, canvas: Box<dyn Cursor>) {
        let mut state = self.shared.state.lock();
        state.replacement_canvas = Some(canvas);
        if state.is_rendering() {
            state.bump_generation();
        }
    }

    pub fn status(&self) -> RenderStatus {
        let state = self.shared.state.lock();
        match state.phase {
            Phase::Idle => RenderStatus::Idle,
            Phase::Rendering { .. } => RenderStatus::Rendering {
                generation: state
                    .pass
                    .as_ref()
                    .map_or(state.generation, |pass| pass.generation),
            },
        }
    }

    pub fn generation(&self) -> Generation {
        self.shared.state.lock().generation
    }

    pub fn snapshot(&self) -> Vec<Item> {
        self.shared.state.lock().scene.snapshot()
    }

    pub fn len(&self) -> usize {
        self.shared.state.lock().scene.len()
    }

    pub fn subscribe(&self) -> flume::Receiver<RenderEvent> {
        self.shared.state.lock().observers.subscribe()
    }

    /// Blocks until no worker thread is alive.
    pub fn wait_idle(&self) {
        let mut state = self.shared.state.lock();
        while state.live_workers > 0 {
            self.shared.retired.wait(&mut state);
        }
    }

    /// Like [`wait_idle`](Self::wait_idle), giving up after `timeout`.
    /// Returns whether the painting became idle.
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.shared.state.lock();
        while state.live_workers > 0 {
            if self
                .shared
                .retired
                .wait_until(&mut state, deadline)
                .timed_out()
            {
                return state.live_workers == 0;
            }
        }
        true
    }

    fn full_render(&self, state: &mut MutexGuard<State>) {
        let generation = state.bump_generation();
        log::debug!("Full render requested at {}", generation);
        if !state.is_rendering() {
            self.spawn_worker(state);
        }
    }

    fn spawn_worker(&self, state: &mut MutexGuard<State>) {
        let worker = WorkerId(state.next_worker);
        state.next_worker += 1;
        state.phase = Phase::Rendering { worker };
        state.pass = None;
        state.live_workers += 1;

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name(self.shared.settings.thread_name.clone())
            .spawn(move || worker::run(&shared, worker));

        match spawned {
            Ok(_) => log::debug!("Spawned render worker {}", worker.0),
            Err(e) => {
                log::error!("Failed to spawn render worker: {}", e);
                state.phase = Phase::Idle;
                state.live_workers -= 1;
            }
        }
    }
}
