//! Where finalize jobs run.
//!
//! `stop()` hands its job to an executor and returns immediately. The
//! production executor runs every job on its own thread; the inline one runs
//! it on the caller, which keeps tests free of timing races.

use std::sync::{Arc, Condvar, Mutex};
use std::thread;

pub type Job = Box<dyn FnOnce() + Send + 'static>;

pub trait Executor: Send + Sync {
    fn execute(&self, job: Job);
}

/// Runs the job right away on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
    fn execute(&self, job: Job) {
        job();
    }
}

/// Spawns one detached, named thread per job.
///
/// Callers never join; whoever owns the process lifecycle can call
/// [`ThreadExecutor::wait_idle`] before exiting so pending writes land.
#[derive(Debug, Default, Clone)]
pub struct ThreadExecutor {
    pending: Arc<(Mutex<usize>, Condvar)>,
}

impl ThreadExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until every job handed out so far has finished.
    pub fn wait_idle(&self) {
        let (lock, cvar) = &*self.pending;
        let Ok(mut count) = lock.lock() else {
            return;
        };
        while *count > 0 {
            count = match cvar.wait(count) {
                Ok(c) => c,
                Err(_) => return,
            };
        }
    }

    fn adjust(pending: &(Mutex<usize>, Condvar), up: bool) {
        let (lock, cvar) = pending;
        if let Ok(mut count) = lock.lock() {
            if up {
                *count += 1;
            } else {
                *count = count.saturating_sub(1);
            }
            cvar.notify_all();
        }
    }
}

impl Executor for ThreadExecutor {
    fn execute(&self, job: Job) {
        Self::adjust(&self.pending, true);
        let pending = Arc::clone(&self.pending);

        let spawned = thread::Builder::new()
            .name("track-finalize".into())
            .spawn(move || {
                // il contatore scende anche se il job va in panic
                struct Done(Arc<(Mutex<usize>, Condvar)>);
                impl Drop for Done {
                    fn drop(&mut self) {
                        ThreadExecutor::adjust(&self.0, false);
                    }
                }
                let _done = Done(pending);
                job();
            });

        if let Err(e) = spawned {
            log::error!("failed to spawn finalize thread: {e}");
            Self::adjust(&self.pending, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn inline_runs_before_returning() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        InlineExecutor.execute(Box::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn thread_executor_wait_idle_sees_all_jobs() {
        let exec = ThreadExecutor::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..4 {
            let h = Arc::clone(&hits);
            exec.execute(Box::new(move || {
                thread::sleep(Duration::from_millis(20));
                h.fetch_add(1, Ordering::SeqCst);
            }));
        }

        exec.wait_idle();
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }
}
