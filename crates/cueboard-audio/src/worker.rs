// crates/cueboard-audio/src/worker.rs
//
// AudioWorker: background probe threads + the result channel the UI drains
// once per frame. All public API that cueboard-ui calls lives here.

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, atomic::{AtomicBool, Ordering}};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use uuid::Uuid;

use cueboard_core::ProbeResult;

use crate::probe::probe_source;

/// Max probe threads decoding at once. Imports beyond this queue on the
/// semaphore instead of piling up decoder threads.
const PROBE_CONCURRENCY: u32 = 2;

pub struct AudioWorker {
    /// Probe results, drained by the app each frame.
    pub rx:    Receiver<ProbeResult>,
    tx:        Sender<ProbeResult>,
    shutdown:  Arc<AtomicBool>,
    /// (active_count, Condvar) — limits concurrent probe threads.
    probe_sem: Arc<(Mutex<u32>, Condvar)>,
}

impl Default for AudioWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioWorker {
    pub fn new() -> Self {
        let (tx, rx) = bounded(64);
        Self {
            rx,
            tx,
            shutdown:  Arc::new(AtomicBool::new(false)),
            probe_sem: Arc::new((Mutex::new(0), Condvar::new())),
        }
    }

    /// Decode `path` on a background thread and report duration + waveform
    /// peaks for `id` on the result channel.
    ///
    /// The spawned thread acquires the semaphore *before* doing any work, so
    /// a burst of imports holds at most PROBE_CONCURRENCY decoders plus a few
    /// parked waiters.
    pub fn probe(&self, id: Uuid, path: PathBuf) {
        let tx  = self.tx.clone();
        let sd  = self.shutdown.clone();
        let sem = self.probe_sem.clone();

        thread::spawn(move || {
            {
                let (lock, cvar) = &*sem;
                let mut count = lock.lock().unwrap();
                while *count >= PROBE_CONCURRENCY {
                    count = cvar.wait(count).unwrap();
                }
                *count += 1;
            }
            // RAII release — decrements the count and wakes the next waiter
            // on every exit path, including a panicking decoder.
            struct SemGuard(Arc<(Mutex<u32>, Condvar)>);
            impl Drop for SemGuard {
                fn drop(&mut self) {
                    let (lock, cvar) = &*self.0;
                    *lock.lock().unwrap() -= 1;
                    cvar.notify_one();
                }
            }
            let _guard = SemGuard(sem);

            if sd.load(Ordering::Relaxed) {
                return;
            }
            probe_source(&path, id, &tx);
        });
    }

    /// Stop accepting work. In-flight probes finish their decode but their
    /// results land in a channel nobody reads — harmless.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
