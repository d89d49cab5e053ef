//! Deferred work that must run after the current frame's scene traversal.
//!
//! Tree-restructuring operations (reparenting, removing, replacing nodes) are not
//! allowed while the renderer walks the scene. Instead they are pushed into a
//! `TaskQueue` owned by the context they operate on, and the frame driver flushes
//! the queue on the same thread once traversal has completed:
//!
//! ```rust,ignore
//! session.tasks.defer("commit", move |s: &mut Session| s.commit(group));
//! // ... traversal ...
//! sched::flush(&mut session, |s| &mut s.tasks)?;
//! ```
//!
//! Tasks run strictly in the order they were deferred. Tasks deferred by a running
//! task are executed in the same flush, so all work produced by a frame is done
//! before the next frame starts.

use std::fmt;

use failure::format_err;
use log::{trace, warn};

use crate::errors::Result;

/// The maximum number of nested rounds a single `flush` performs before giving up.
pub const MAX_FLUSH_ROUNDS: usize = 16;

type TaskFn<C> = Box<dyn FnOnce(&mut C) -> Result<()>>;

/// A named unit of deferred work.
pub struct Task<C> {
    name: &'static str,
    func: TaskFn<C>,
}

impl<C> Task<C> {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn run(self, ctx: &mut C) -> Result<()> {
        (self.func)(ctx)
    }
}

impl<C> fmt::Debug for Task<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Task({})", self.name)
    }
}

/// FIFO of tasks operating on a context of type `C`.
pub struct TaskQueue<C> {
    tasks: Vec<Task<C>>,
}

impl<C> Default for TaskQueue<C> {
    fn default() -> Self {
        TaskQueue::new()
    }
}

impl<C> TaskQueue<C> {
    pub fn new() -> Self {
        TaskQueue { tasks: Vec::new() }
    }

    /// Schedules `func` to run with exclusive access to the context at the next flush.
    pub fn defer<F>(&mut self, name: &'static str, func: F)
    where
        F: FnOnce(&mut C) -> Result<()> + 'static,
    {
        trace!("[TaskQueue] defers {}.", name);
        self.tasks.push(Task {
            name,
            func: Box::new(func),
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Names of pending tasks, in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|v| v.name).collect()
    }

    /// Takes every pending task out of this queue.
    #[inline]
    pub fn take(&mut self) -> TaskBatch<C> {
        TaskBatch {
            tasks: ::std::mem::replace(&mut self.tasks, Vec::new()),
        }
    }
}

/// A batch of tasks detached from its queue, so it can run with `&mut C`.
pub struct TaskBatch<C> {
    tasks: Vec<Task<C>>,
}

impl<C> TaskBatch<C> {
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every task in order. A failing task does not prevent the others from
    /// running; the first failure is returned after the whole batch is done.
    pub fn execute(self, ctx: &mut C) -> Result<usize> {
        let mut first_err = None;
        let len = self.tasks.len();

        for task in self.tasks {
            let name = task.name;
            if let Err(err) = task.run(ctx) {
                warn!("[TaskQueue] task {} failed: {}", name, err);
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(len),
        }
    }
}

/// Drains the queue reached through `queue` and runs its tasks against `ctx`,
/// including tasks deferred while flushing. Returns the number of executed tasks.
pub fn flush<C, F>(ctx: &mut C, queue: F) -> Result<usize>
where
    F: Fn(&mut C) -> &mut TaskQueue<C>,
{
    let mut executed = 0;
    let mut first_err = None;

    for _ in 0..MAX_FLUSH_ROUNDS {
        let batch = queue(ctx).take();
        if batch.is_empty() {
            return match first_err {
                Some(err) => Err(err),
                None => Ok(executed),
            };
        }

        executed += batch.len();
        if let Err(err) = batch.execute(ctx) {
            if first_err.is_none() {
                first_err = Some(err);
            }
        }
    }

    Err(format_err!(
        "deferred tasks keep rescheduling after {} rounds: {:?}",
        MAX_FLUSH_ROUNDS,
        queue(ctx).names()
    ))
}
