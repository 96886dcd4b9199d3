//! Deferred-task scheduling
//!
//! The one asynchronous thing the coordinator does: closing the home app
//! underneath a freshly-opened search surface is deferred to a later turn of
//! the event loop so the search surface gets a chance to render first. The
//! deferred task captures coordinator state by shared reference at schedule
//! time and reads whatever is current at run time -- events that land before
//! the tick change what it sees, which is the intended behavior, not a race
//! to guard against.

use std::cell::RefCell;
use std::collections::VecDeque;

pub type DeferredTask = Box<dyn FnOnce()>;

/// Capability to run a task on a later turn of the same event loop.
pub trait Scheduler {
    fn defer(&self, task: DeferredTask);
}

/// Queue-backed scheduler drained once per loop turn by the driver.
#[derive(Default)]
pub struct TickScheduler {
    queue: RefCell<VecDeque<DeferredTask>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run everything deferred up to now. Tasks deferred while running are
    /// left for the next tick. Returns how many tasks ran.
    pub fn run_pending(&self) -> usize {
        let pending: Vec<DeferredTask> = self.queue.borrow_mut().drain(..).collect();
        let count = pending.len();
        for task in pending {
            task();
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl Scheduler for TickScheduler {
    fn defer(&self, task: DeferredTask) {
        self.queue.borrow_mut().push_back(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_deferred_task_does_not_run_until_tick() {
        let scheduler = TickScheduler::new();
        let ran = Rc::new(Cell::new(false));
        {
            let ran = Rc::clone(&ran);
            scheduler.defer(Box::new(move || ran.set(true)));
        }

        assert!(!ran.get());
        assert_eq!(scheduler.run_pending(), 1);
        assert!(ran.get());
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_tasks_run_in_defer_order() {
        let scheduler = TickScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            scheduler.defer(Box::new(move || log.borrow_mut().push(name)));
        }

        scheduler.run_pending();

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_task_deferred_during_run_waits_for_next_tick() {
        let scheduler = Rc::new(TickScheduler::new());
        let ran = Rc::new(Cell::new(0));
        {
            let scheduler2 = Rc::clone(&scheduler);
            let ran = Rc::clone(&ran);
            scheduler.defer(Box::new(move || {
                let ran = Rc::clone(&ran);
                scheduler2.defer(Box::new(move || ran.set(ran.get() + 1)));
            }));
        }

        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(ran.get(), 0);
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_deferred_task_reads_state_current_at_run_time() {
        let scheduler = TickScheduler::new();
        let value = Rc::new(Cell::new(1));
        let observed = Rc::new(Cell::new(0));
        {
            let value = Rc::clone(&value);
            let observed = Rc::clone(&observed);
            scheduler.defer(Box::new(move || observed.set(value.get())));
        }

        // State changes between schedule time and run time.
        value.set(2);
        scheduler.run_pending();

        assert_eq!(observed.get(), 2);
    }
}
