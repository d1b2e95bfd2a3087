use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use codenames::{HintError, HintRequest, HintResult, PendingHint, RequestToken, Team};
use tracing::debug;

use crate::service::HintService;

/// The outcome of one request, as reported by a worker thread.
#[derive(Debug)]
pub struct HintOutcome {
    pub token: RequestToken,
    pub team: Team,
    pub request: HintRequest,
    pub outcome: Result<HintResult, HintError>,
    pub elapsed: Duration,
}

/// Runs hint requests in the background.
///
/// Every request gets its own worker thread, so the caller stays free to
/// edit the board while a request is in flight. Outcomes are collected in
/// the order they finish, which need not be the order they were issued in.
pub struct Dispatcher<S> {
    service: Arc<S>,
    sender: Sender<HintOutcome>,
    receiver: Receiver<HintOutcome>,
    in_flight: usize,
}

impl<S> Dispatcher<S>
where
    S: HintService + Send + Sync + 'static,
{
    pub fn new(service: S) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service: Arc::new(service),
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// The number of requests that have not reported back yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn dispatch(&mut self, pending: PendingHint) {
        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        debug!(token = %pending.token, team = %pending.team, "Dispatching hint request");
        self.in_flight += 1;
        thread::spawn(move || {
            let start = Instant::now();
            // A panicking service still has to report back, or `next()` would wait forever
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                service.generate_hints(&pending.request)
            }))
            .unwrap_or_else(|_| Err(HintError::Network(String::from("hint worker panicked"))));
            // The receiver is gone only if the dispatcher was dropped, and
            // then nobody is interested anymore.
            let _ = sender.send(HintOutcome {
                token: pending.token,
                team: pending.team,
                request: pending.request,
                outcome,
                elapsed: start.elapsed(),
            });
        });
    }

    /// Returns a finished outcome without blocking, if there is one.
    pub fn try_next(&mut self) -> Option<HintOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => {
                self.in_flight -= 1;
                Some(outcome)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks until the next outcome arrives. Returns `None` right away if
    /// nothing is in flight.
    pub fn next(&mut self) -> Option<HintOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.receiver.recv().ok()?;
        self.in_flight -= 1;
        Some(outcome)
    }
}
