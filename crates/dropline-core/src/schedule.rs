//! Single-threaded deferred-task queue.
//!
//! The choreography has two timing gates (the bounded open latency and the
//! post-press grace period). Rather than wall-clock timers, both are
//! explicit tasks over the injected [`Clock`], run in submission order by
//! [`Scheduler::tick`]; tests advance a [`TestClock`] instead of sleeping.
//!
//! [`TestClock`]: crate::animation::TestClock

use std::cell::RefCell;
use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::animation::Clock;

struct Task {
    due: Instant,
    run: Box<dyn FnOnce()>,
}

pub struct Scheduler {
    clock: Rc<dyn Clock>,
    queue: RefCell<Vec<Task>>,
}

impl Scheduler {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            queue: RefCell::new(Vec::new()),
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Queue `f` to run once `delay` has elapsed. There is no cancellation:
    /// callers that may be superseded guard themselves (weak handle plus
    /// open-epoch) and no-op when they fire late.
    pub fn run_after(&self, delay: Duration, f: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push(Task {
            due: self.clock.now() + delay,
            run: Box::new(f),
        });
    }

    /// Run every task due at the current time, in submission order.
    /// Tasks queued while ticking wait for the next tick. Returns how many
    /// tasks ran.
    pub fn tick(&self) -> usize {
        let now = self.clock.now();
        let due: Vec<Task> = {
            let mut q = self.queue.borrow_mut();
            let (ready, rest): (Vec<_>, Vec<_>) = q.drain(..).partition(|t| t.due <= now);
            *q = rest;
            ready
        };
        let n = due.len();
        for task in due {
            (task.run)();
        }
        n
    }

    pub fn is_idle(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}
