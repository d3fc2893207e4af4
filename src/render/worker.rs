use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    thread,
};

use glam::vec2;
use parking_lot::MutexGuard;

use super::{Phase, Shared, Step, WorkerId};
use crate::{
    error::DrawError,
    event::{AbortReason, RenderEvent},
    Cursor, Item,
};

/// Body of a render worker thread.
pub(super) fn run(shared: &Shared, worker: WorkerId) {
    // Declared before the locks so it runs after they are released.
    let _exit = ExitGuard { shared, worker };
    let mut canvas = shared.canvas.lock();

    let mut state = shared.state.lock();
    loop {
        match state.next_step(worker) {
            Step::Stop => {
                log::debug!("Render worker {} stopped", worker.0);
                break;
            }
            Step::Retire(generation) => {
                log::debug!("Render worker {} retiring after {}", worker.0, generation);
                break;
            }
            Step::Restart(generation) => {
                if let Some(replacement) = state.replacement_canvas.take() {
                    *canvas = replacement;
                }
                log::debug!("Starting pass {}", generation);
                MutexGuard::unlocked(&mut state, || {
                    canvas.clear(shared.width, shared.height)
                });
            }
            Step::Draw(item, generation) => {
                let result =
                    MutexGuard::unlocked(&mut state, || draw_item(&mut **canvas, &item));
                state.finish_item(item.id(), generation, result);
            }
        }
    }
    drop(state);

    let park = vec2(shared.width as f32, shared.height as f32) + shared.settings.park_offset;
    canvas.pen_up();
    canvas.go_to(park);
}

/// Releases the worker's slot when its thread exits, including by
/// unwinding out of the canvas.
struct ExitGuard<'a> {
    shared: &'a Shared,
    worker: WorkerId,
}

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        if state.is_active(self.worker) {
            log::error!("Render worker {} panicked", self.worker.0);
            state.phase = Phase::Idle;
            if let Some(pass) = state.pass.take() {
                state.observers.emit(RenderEvent::PassAborted {
                    generation: pass.generation,
                    reason: AbortReason::WorkerPanicked,
                });
            }
        } else if thread::panicking() {
            log::error!("Render worker {} panicked while parking", self.worker.0);
        }
        state.live_workers -= 1;
        drop(state);
        self.shared.retired.notify_all();
    }
}

/// Draws one item, turning errors and panics into a [`DrawError`].
fn draw_item(cursor: &mut dyn Cursor, item: &Item) -> Result<(), DrawError> {
    let id = item.id();
    match panic::catch_unwind(AssertUnwindSafe(|| item.drawable().draw(cursor))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(DrawError::Failed { id, source }),
        Err(payload) => Err(DrawError::Panicked {
            id,
            message: panic_message(&*payload),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
