//! The concurrent scanning pipeline
//!
//! A dispatcher feeds domains into a shared channel in fixed-size groups
//! with a pause between groups; a fixed set of workers pull from the shared
//! receiver, run the verification protocol and forward positives to the
//! sink. Each worker serializes its own requests with a mandatory delay, so
//! global concurrency equals the worker count.

use crate::{Config, HttpProbe, ResultSink, ScanError, Verifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Counters for one completed run
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Domains pulled and verified (positive or negative)
    pub processed: usize,
    /// Domains recorded by the sink
    pub positives: usize,
    /// Sink write failures
    pub sink_errors: usize,
}

struct ScanWorker {
    id: usize,
    verifier: Verifier,
    sink: Arc<dyn ResultSink>,
    request_delay: Duration,
    processed: Arc<AtomicUsize>,
    positives: Arc<AtomicUsize>,
    sink_errors: Arc<AtomicUsize>,
}

impl ScanWorker {
    /// Pull domains from the shared receiver until the queue is closed and
    /// drained
    ///
    /// The lock is released between the pull and the network work, so one
    /// worker's slow target never stalls the others.
    async fn run(self, queue: Arc<Mutex<mpsc::Receiver<String>>>) {
        info!("scan worker {} started", self.id);

        loop {
            let domain = {
                let mut receiver = queue.lock().await;
                receiver.recv().await
            };

            match domain {
                Some(domain) => {
                    self.process(&domain).await;
                    sleep(self.request_delay).await;
                }
                None => break,
            }
        }

        info!("scan worker {} stopped", self.id);
    }

    async fn process(&self, domain: &str) {
        debug!("worker {} verifying {}", self.id, domain);
        let outcome = self.verifier.verify(domain).await;
        self.processed.fetch_add(1, Ordering::Relaxed);

        if !outcome.is_positive() {
            return;
        }

        match self.sink.record(domain).await {
            Ok(()) => {
                self.positives.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.sink_errors.fetch_add(1, Ordering::Relaxed);
                warn!("worker {} could not record {}: {}", self.id, domain, e);
            }
        }
    }
}

/// Orchestrates the dispatcher, the worker pool and the sink for one run
pub struct Scanner {
    config: Config,
    verifier: Verifier,
    sink: Arc<dyn ResultSink>,
}

impl Scanner {
    pub fn new(config: Config, sink: Arc<dyn ResultSink>) -> Result<Self, ScanError> {
        let probe = HttpProbe::new(&config)?;

        Ok(Self {
            config,
            verifier: Verifier::new(probe),
            sink,
        })
    }

    /// Scan the given domains to completion
    ///
    /// Every domain is delivered to exactly one worker exactly once;
    /// completion order is whatever network latency makes it. Returns after
    /// the queue is drained and every worker has exited.
    pub async fn run(&self, domains: Vec<String>) -> ScanSummary {
        let batch_size = self.config.batch_size.max(1);
        let (tx, rx) = mpsc::channel::<String>(batch_size);
        let queue = Arc::new(Mutex::new(rx));

        let processed = Arc::new(AtomicUsize::new(0));
        let positives = Arc::new(AtomicUsize::new(0));
        let sink_errors = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(self.config.worker_count);
        for id in 0..self.config.worker_count {
            let worker = ScanWorker {
                id,
                verifier: self.verifier.clone(),
                sink: self.sink.clone(),
                request_delay: self.config.request_delay,
                processed: processed.clone(),
                positives: positives.clone(),
                sink_errors: sink_errors.clone(),
            };
            let queue = queue.clone();
            handles.push(tokio::spawn(worker.run(queue)));
        }

        let total_groups = domains.len().div_ceil(batch_size);
        for (index, group) in domains.chunks(batch_size).enumerate() {
            debug!(
                "dispatching group {}/{} ({} domains)",
                index + 1,
                total_groups,
                group.len()
            );

            for domain in group {
                if tx.send(domain.clone()).await.is_err() {
                    warn!("scan queue closed before all domains were dispatched");
                    break;
                }
            }

            if index + 1 < total_groups {
                sleep(self.config.network_pause).await;
            }
        }

        // Closing the sender is what lets workers drain and exit
        drop(tx);

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("scan worker panicked: {}", e);
            }
        }

        ScanSummary {
            processed: processed.load(Ordering::Relaxed),
            positives: positives.load(Ordering::Relaxed),
            sink_errors: sink_errors.load(Ordering::Relaxed),
        }
    }
}
