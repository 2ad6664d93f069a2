use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::{EditScript, RecyclerItem, reconcile};

/// Invoked on the worker thread after an outcome was queued.
pub type DiffReadyCallback = Arc<dyn Fn() + Send + Sync>;

/// A finished background reconciliation.
#[derive(Clone, Debug)]
pub struct DiffOutcome<I> {
    pub generation: u64,
    /// The sequence the script leads to.
    pub sequence: Arc<[I]>,
    pub script: EditScript<I>,
}

struct Job<I> {
    generation: u64,
    old: Arc<[I]>,
    new: Arc<[I]>,
}

struct Slot<I> {
    pending: Option<Job<I>>,
    closed: bool,
}

struct Shared<I> {
    slot: Mutex<Slot<I>>,
    wake: Condvar,
}

impl<I> Shared<I> {
    fn lock(&self) -> MutexGuard<'_, Slot<I>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A single worker thread computing edit scripts off the presentation thread.
///
/// Submissions go into a one-element slot: a job that has not been picked up yet is replaced
/// by the next submission. A job already being computed runs to completion; callers decide
/// whether its outcome is still current by comparing generations.
pub struct BackgroundDiffer<I> {
    shared: Arc<Shared<I>>,
    outcomes: Receiver<DiffOutcome<I>>,
    worker: Option<JoinHandle<()>>,
}

impl<I: RecyclerItem> BackgroundDiffer<I> {
    pub fn spawn(on_ready: Option<DiffReadyCallback>) -> io::Result<Self> {
        let shared = Arc::new(Shared {
            slot: Mutex::new(Slot {
                pending: None,
                closed: false,
            }),
            wake: Condvar::new(),
        });
        let (tx, outcomes) = mpsc::channel();
        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("recycli-diff".into())
            .spawn(move || run_worker(worker_shared, tx, on_ready))?;
        rdebug!("BackgroundDiffer::spawn");
        Ok(Self {
            shared,
            outcomes,
            worker: Some(worker),
        })
    }

    /// Queues `old -> new` as `generation`, superseding any job not yet started.
    pub fn submit(&self, generation: u64, old: Arc<[I]>, new: Arc<[I]>) {
        let mut slot = self.shared.lock();
        if let Some(_stale) = slot.pending.replace(Job {
            generation,
            old,
            new,
        }) {
            rdebug!(
                superseded = _stale.generation,
                by = generation,
                "BackgroundDiffer::submit"
            );
        }
        drop(slot);
        self.shared.wake.notify_one();
    }

    pub fn try_recv(&self) -> Option<DiffOutcome<I>> {
        self.outcomes.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<DiffOutcome<I>> {
        match self.outcomes.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl<I> Drop for BackgroundDiffer<I> {
    fn drop(&mut self) {
        self.shared.lock().closed = true;
        self.shared.wake.notify_one();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                rwarn!("BackgroundDiffer: worker panicked");
            }
        }
    }
}

impl<I> core::fmt::Debug for BackgroundDiffer<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BackgroundDiffer").finish_non_exhaustive()
    }
}

fn run_worker<I: RecyclerItem>(
    shared: Arc<Shared<I>>,
    tx: Sender<DiffOutcome<I>>,
    on_ready: Option<DiffReadyCallback>,
) {
    loop {
        let job = {
            let mut slot = shared.lock();
            loop {
                if slot.closed {
                    return;
                }
                if let Some(job) = slot.pending.take() {
                    break job;
                }
                slot = shared
                    .wake
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        let script = reconcile(&job.old, &job.new);
        rtrace!(
            generation = job.generation,
            ops = script.len(),
            "BackgroundDiffer: outcome ready"
        );
        let outcome = DiffOutcome {
            generation: job.generation,
            sequence: job.new,
            script,
        };
        if tx.send(outcome).is_err() {
            return;
        }
        if let Some(cb) = &on_ready {
            cb();
        }
    }
}
