//! Background request runner
//!
//! Runs backend requests off the UI thread. Each request gets its own worker
//! thread; completions are collected with `poll` on every tick.

use super::backend::{Backend, BackendError, Outcome, Request};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// A finished request together with what came back
#[derive(Debug)]
pub struct Completed {
    pub request: Request,
    pub result: Result<Outcome, BackendError>,
}

pub struct RequestRunner {
    backend: Arc<dyn Backend>,
    tx: Sender<Completed>,
    rx: Receiver<Completed>,
    in_flight: usize,
}

impl RequestRunner {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Number of requests dispatched but not yet collected
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Hand a request to a worker thread
    pub fn dispatch(&mut self, request: Request) {
        debug!(request = request.name(), "dispatching request");
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        self.in_flight += 1;

        thread::spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| backend.submit(request.clone())))
                .unwrap_or_else(|_| {
                    Err(BackendError::Unavailable(format!(
                        "{} request crashed",
                        request.name()
                    )))
                });
            let _ = tx.send(Completed { request, result });
        });
    }

    /// Collect every request that finished since the last poll
    pub fn poll(&mut self) -> Vec<Completed> {
        let mut done = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(completed) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if let Err(ref err) = completed.result {
                        warn!(request = completed.request.name(), error = %err, "request failed");
                    }
                    done.push(completed);
                }
                // The runner keeps its own sender, so the channel never disconnects
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        done
    }
}
