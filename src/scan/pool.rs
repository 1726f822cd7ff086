//! Fixed-size pool of probe worker threads.

use std::any::Any;
use std::collections::HashMap;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, trace, warn};
use vidmeta_av::Prober;

use super::sidecar::find_sidecars;
use super::state::RunState;
use super::volume::{self, VolumeInfo};
use super::walker::FileTask;
use crate::table::{MetadataRecord, Outcome, ProbeFailure, ResultAggregator};
use crate::{Error, Result};

/// Everything a worker needs to turn a task into an outcome.
pub struct ProbeContext {
    pub prober: Arc<dyn Prober>,
    pub aggregator: Arc<ResultAggregator>,
    pub state: Arc<RunState>,
    /// Volume of each scan root.
    pub volumes: HashMap<PathBuf, VolumeInfo>,
    pub subtitle_language: String,
}

impl ProbeContext {
    fn volume_for(&self, root: &Path) -> VolumeInfo {
        self.volumes
            .get(root)
            .cloned()
            .unwrap_or_else(|| volume::resolve_volume(root, None))
    }
}

/// Worker threads reading [`FileTask`]s from a bounded queue.
///
/// [`submit`](Self::submit) blocks while the queue is full, which keeps the
/// walker from running far ahead of the workers.
pub struct ProbePool {
    sender: Option<Sender<FileTask>>,
    workers: Vec<JoinHandle<()>>,
}

impl ProbePool {
    /// Start `worker_count` workers behind a queue of `queue_capacity`.
    pub fn spawn(
        worker_count: usize,
        queue_capacity: usize,
        context: Arc<ProbeContext>,
    ) -> Result<Self> {
        if worker_count == 0 {
            return Err(Error::config("worker count cannot be 0"));
        }
        let (sender, receiver) = bounded(queue_capacity.max(1));

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            let receiver = receiver.clone();
            let context = Arc::clone(&context);
            let handle = thread::Builder::new()
                .name(format!("probe-{}", id))
                .spawn(move || worker_loop(id, receiver, context))
                .map_err(|e| Error::WorkerPool(format!("failed to spawn worker {}: {}", id, e)))?;
            workers.push(handle);
        }

        debug!(count = workers.len(), capacity = queue_capacity, "Workers spawned");
        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    /// Queue a task, blocking while the queue is full.
    pub fn submit(&self, task: FileTask) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| Error::WorkerPool("pool already closed".to_string()))?;
        sender
            .send(task)
            .map_err(|_| Error::WorkerPool("all workers have exited".to_string()))
    }

    /// Close the queue and wait for the workers to drain it.
    pub fn finish(mut self) -> Result<()> {
        drop(self.sender.take());

        let mut panicked = 0;
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                panicked += 1;
            }
        }

        if panicked > 0 {
            return Err(Error::WorkerPool(format!(
                "{} worker(s) panicked",
                panicked
            )));
        }
        Ok(())
    }
}

fn worker_loop(id: usize, receiver: Receiver<FileTask>, context: Arc<ProbeContext>) {
    trace!(worker = id, "Worker started");
    for task in receiver.iter() {
        let outcome = process_task(&context, &task);
        let success = outcome.is_success();
        context.aggregator.insert(outcome);
        if success {
            context.state.record_success();
        } else {
            context.state.record_failure();
        }
    }
    trace!(worker = id, "Worker finished");
}

/// Probe one file and build its outcome. Never panics on prober failure.
pub fn process_task(context: &ProbeContext, task: &FileTask) -> Outcome {
    let volume = context.volume_for(&task.root);
    let drive_path = volume::drive_path(&task.path, &volume.mount_point);

    let failure = |size_bytes: Option<u64>, reason: String| {
        warn!("Failed to probe {:?}: {}", task.path, reason);
        Outcome::Failed(ProbeFailure {
            path: task.path.clone(),
            volume_label: volume.label.clone(),
            drive_path: drive_path.clone(),
            size_bytes,
            reason,
        })
    };

    let size_bytes = match fs::metadata(&task.path) {
        Ok(meta) => meta.len(),
        Err(e) => return failure(None, format!("unreadable path: {}", e)),
    };

    let probed = panic::catch_unwind(AssertUnwindSafe(|| context.prober.probe(&task.path)));
    match probed {
        Ok(Ok(info)) => {
            debug!("Got metadata for {:?}", task.path);
            let subtitles = find_sidecars(&task.path, &context.subtitle_language);
            Outcome::Probed(MetadataRecord::from_media_info(
                &info,
                size_bytes,
                subtitles,
                volume.label.clone(),
                drive_path.clone(),
            ))
        }
        Ok(Err(e)) => failure(Some(size_bytes), e.to_string()),
        Err(payload) => failure(
            Some(size_bytes),
            format!("{} panicked: {}", context.prober.name(), panic_message(payload.as_ref())),
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
