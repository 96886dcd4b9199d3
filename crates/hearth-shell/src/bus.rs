//! In-process event bus with ordered, run-to-completion dispatch
//!
//! Events are handled strictly in arrival order, one fully before the next
//! begins: publishing from inside a handler enqueues the event, and the
//! outermost `publish` call drains the queue after the current event's
//! subscribers have all run. This is what lets the coordinator emit its
//! canonical "home requested" event mid-handler without reentrancy guards.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use tracing::trace;

use hearth_core::{EventKind, ShellEvent};

/// What a subscriber tells the bus after seeing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Deliver to the remaining subscribers.
    Continue,
    /// Suppress default handling: remaining subscribers do not see the
    /// event. Used by the coordinator to intercept open requests that
    /// target a home surface.
    Stop,
}

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Handler = Rc<dyn Fn(&ShellEvent) -> Dispatch>;

struct Entry {
    id: SubscriptionId,
    handler: Handler,
}

/// Synchronous single-threaded event bus keyed by [`EventKind`].
#[derive(Default)]
pub struct ShellBus {
    subscribers: RefCell<HashMap<EventKind, Vec<Entry>>>,
    queue: RefCell<VecDeque<ShellEvent>>,
    dispatching: Cell<bool>,
    next_id: Cell<u64>,
}

impl ShellBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one event kind. Subscribers run in subscription order.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&ShellEvent) -> Dispatch + 'static,
    {
        self.insert(kind, Rc::new(handler), false)
    }

    /// Subscribe ahead of all existing subscribers for this kind. The
    /// intercepting open-request handler must see the event before anyone
    /// else so it can stop propagation.
    pub fn subscribe_front<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&ShellEvent) -> Dispatch + 'static,
    {
        self.insert(kind, Rc::new(handler), true)
    }

    fn insert(&self, kind: EventKind, handler: Handler, front: bool) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let mut subscribers = self.subscribers.borrow_mut();
        let entries = subscribers.entry(kind).or_default();
        let entry = Entry { id, handler };
        if front {
            entries.insert(0, entry);
        } else {
            entries.push(entry);
        }
        id
    }

    /// Remove a subscription. Safe to call from inside a handler; an
    /// in-flight dispatch still sees the subscriber list it started with.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subscribers = self.subscribers.borrow_mut();
        for entries in subscribers.values_mut() {
            entries.retain(|e| e.id != id);
        }
    }

    /// Publish an event.
    ///
    /// Outside a dispatch this delivers immediately and then drains anything
    /// handlers published. Inside a dispatch it only enqueues; the event is
    /// delivered once the current one completes.
    pub fn publish(&self, event: ShellEvent) {
        self.queue.borrow_mut().push_back(event);
        if self.dispatching.get() {
            return;
        }

        self.dispatching.set(true);
        while let Some(event) = {
            let mut queue = self.queue.borrow_mut();
            queue.pop_front()
        } {
            self.deliver(&event);
        }
        self.dispatching.set(false);
    }

    fn deliver(&self, event: &ShellEvent) {
        trace!(event = event.event_type(), "dispatch");

        // Snapshot the handler list so handlers may (un)subscribe freely;
        // changes take effect for the next event.
        let handlers: Vec<Handler> = self
            .subscribers
            .borrow()
            .get(&event.kind())
            .map(|entries| entries.iter().map(|e| Rc::clone(&e.handler)).collect())
            .unwrap_or_default();

        for handler in handlers {
            if handler(event) == Dispatch::Stop {
                trace!(event = event.event_type(), "propagation stopped");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(
        bus: &ShellBus,
        kind: EventKind,
        log: &Rc<RefCell<Vec<&'static str>>>,
        name: &'static str,
    ) -> SubscriptionId {
        let log = Rc::clone(log);
        bus.subscribe(kind, move |_| {
            log.borrow_mut().push(name);
            Dispatch::Continue
        })
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let bus = ShellBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        counter(&bus, EventKind::HomeRequested, &log, "first");
        counter(&bus, EventKind::HomeRequested, &log, "second");

        bus.publish(ShellEvent::HomeRequested);

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_subscribe_front_runs_before_existing() {
        let bus = ShellBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        counter(&bus, EventKind::HomeRequested, &log, "late");
        {
            let log = Rc::clone(&log);
            bus.subscribe_front(EventKind::HomeRequested, move |_| {
                log.borrow_mut().push("front");
                Dispatch::Continue
            });
        }

        bus.publish(ShellEvent::HomeRequested);

        assert_eq!(*log.borrow(), vec!["front", "late"]);
    }

    #[test]
    fn test_stop_suppresses_remaining_subscribers() {
        let bus = ShellBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            bus.subscribe(EventKind::HomeRequested, move |_| {
                log.borrow_mut().push("stopper");
                Dispatch::Stop
            });
        }
        counter(&bus, EventKind::HomeRequested, &log, "never");

        bus.publish(ShellEvent::HomeRequested);

        assert_eq!(*log.borrow(), vec!["stopper"]);
    }

    #[test]
    fn test_publish_during_dispatch_runs_after_current_event() {
        let bus = Rc::new(ShellBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            let bus2 = Rc::clone(&bus);
            bus.subscribe(EventKind::ActivityOpened, move |_| {
                log.borrow_mut().push("outer-start");
                bus2.publish(ShellEvent::HomeRequested);
                log.borrow_mut().push("outer-end");
                Dispatch::Continue
            });
        }
        counter(&bus, EventKind::HomeRequested, &log, "inner");

        bus.publish(ShellEvent::ActivityOpened);

        // The nested publish is queued, not delivered reentrantly.
        assert_eq!(*log.borrow(), vec!["outer-start", "outer-end", "inner"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = ShellBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = counter(&bus, EventKind::PrimaryReady, &log, "once");

        bus.publish(ShellEvent::PrimaryReady);
        bus.unsubscribe(id);
        bus.publish(ShellEvent::PrimaryReady);

        assert_eq!(*log.borrow(), vec!["once"]);
    }

    #[test]
    fn test_unsubscribe_from_inside_handler() {
        let bus = Rc::new(ShellBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let id_cell = Rc::new(Cell::new(None));
        {
            let log = Rc::clone(&log);
            let bus2 = Rc::clone(&bus);
            let id_cell_inner = Rc::clone(&id_cell);
            let id = bus.subscribe(EventKind::LandingReady, move |_| {
                log.borrow_mut().push("self-removing");
                if let Some(id) = id_cell_inner.get() {
                    bus2.unsubscribe(id);
                }
                Dispatch::Continue
            });
            id_cell.set(Some(id));
        }

        bus.publish(ShellEvent::LandingReady);
        bus.publish(ShellEvent::LandingReady);

        assert_eq!(*log.borrow(), vec!["self-removing"]);
    }

    #[test]
    fn test_publish_with_no_subscribers_is_a_no_op() {
        let bus = ShellBus::new();
        bus.publish(ShellEvent::AppSwitching);
        bus.publish(ShellEvent::Unknown {
            event: "wallpaper-changed".to_string(),
            params: serde_json::Value::Null,
        });
    }
}
