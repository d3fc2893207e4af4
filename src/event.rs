use std::sync::Arc;

use flume::{Receiver, Sender};

use crate::{error::DrawError, Generation, ItemId};

/// Progress reported by the render worker.
///
/// Obtain a stream of these with [`Painting::subscribe`](crate::Painting::subscribe).
#[derive(Debug, Clone)]
pub enum RenderEvent {
    /// The canvas was cleared and a pass over a fresh snapshot began.
    PassStarted { generation: Generation },
    ItemDrawn { id: ItemId, generation: Generation },
    /// An item failed to draw and was skipped.
    ItemFailed {
        generation: Generation,
        error: Arc<DrawError>,
    },
    /// A pass ended before drawing all of its items.
    PassAborted {
        generation: Generation,
        reason: AbortReason,
    },
    /// Every item of the pass was drawn and the worker retired.
    PassCompleted { generation: Generation },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AbortReason {
    /// A newer generation was requested; a fresh pass replaces this one.
    Superseded,
    /// The painting was stopped.
    Stopped,
    /// The worker panicked outside of a drawable, e.g. inside the canvas.
    WorkerPanicked,
}

#[derive(Default)]
pub(crate) struct Observers {
    senders: Vec<Sender<RenderEvent>>,
}

impl Observers {
    pub fn subscribe(&mut self) -> Receiver<RenderEvent> {
        let (sender, receiver) = flume::unbounded();
        self.senders.push(sender);
        receiver
    }

    /// Sends the event to every live subscriber, forgetting the ones
    /// that hung up.
    pub fn emit(&mut self, event: RenderEvent) {
        self.senders
            .retain(|sender| sender.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut observers = Observers::default();
        let kept = observers.subscribe();
        drop(observers.subscribe());

        observers.emit(RenderEvent::PassCompleted {
            generation: Generation::default(),
        });

        assert_eq!(observers.senders.len(), 1);
        assert!(matches!(
            kept.try_recv(),
            Ok(RenderEvent::PassCompleted { .. })
        ));
    }
}
