//! Single-threaded event loop hosting the bus and scheduler
//!
//! The driver is the embedding point for a host shell: platform code pushes
//! [`ShellEvent`]s through an [`EventSender`] from wherever they originate,
//! and the loop delivers them strictly in arrival order on one thread. Each
//! event dispatches to completion -- including any synthetic events handlers
//! published -- before deferred tasks for that turn run and the next event
//! is taken.

use std::rc::Rc;

use tokio::sync::mpsc;

use hearth_core::prelude::*;
use hearth_core::ShellEvent;

use crate::bus::ShellBus;
use crate::schedule::TickScheduler;

/// Cloneable handle platform code uses to push events into the loop.
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<ShellEvent>,
}

impl EventSender {
    pub fn send(&self, event: ShellEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|e| Error::channel_send(e.to_string()))
    }
}

/// Owns the bus, the tick scheduler, and the inbound event channel.
pub struct ShellDriver {
    bus: Rc<ShellBus>,
    scheduler: Rc<TickScheduler>,
    event_tx: mpsc::UnboundedSender<ShellEvent>,
    event_rx: mpsc::UnboundedReceiver<ShellEvent>,
}

impl ShellDriver {
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            bus: Rc::new(ShellBus::new()),
            scheduler: Rc::new(TickScheduler::new()),
            event_tx,
            event_rx,
        }
    }

    /// The bus to attach the coordinator (and any other subscribers) to.
    pub fn bus(&self) -> Rc<ShellBus> {
        Rc::clone(&self.bus)
    }

    /// The scheduler to construct the coordinator with.
    pub fn scheduler(&self) -> Rc<TickScheduler> {
        Rc::clone(&self.scheduler)
    }

    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.event_tx.clone(),
        }
    }

    /// Drain events until every sender is dropped.
    ///
    /// One turn = one inbound event dispatched to completion, then the
    /// deferred tasks scheduled up to that point. A task deferred by a
    /// handler therefore runs after the triggering event but before the
    /// next inbound one -- unless that event was already queued, which is
    /// the accepted race the deferred search-app close is written for.
    pub async fn run(mut self) {
        debug!("shell driver running");
        while let Some(event) = self.event_rx.recv().await {
            self.bus.publish(event);
            self.scheduler.run_pending();
        }
        // Senders gone; let anything still deferred finish.
        self.scheduler.run_pending();
        debug!("shell driver stopped");
    }
}

impl Default for ShellDriver {
    fn default() -> Self {
        Self::new()
    }
}
