//! Lifecycle of one asynchronous request/response cycle.
//!
//! A controller is bound to one collaborator operation. `submit` clears the
//! previous outcome synchronously and runs the operation on a worker thread;
//! the owner drains finished work with `poll` from its event loop. Only the
//! most recently issued request may settle the controller: a response that
//! arrives for an older ticket is dropped.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};

type RequestFn<Req, Res> = Arc<dyn Fn(Req) -> AppResult<Res> + Send + Sync>;

/// Identifies one submission. Later submissions carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState<T> {
    Idle,
    Running,
    Succeeded(T),
    Failed(String),
}

impl<T> WorkflowState<T> {
    pub fn phase(&self) -> Phase {
        match self {
            WorkflowState::Idle => Phase::Idle,
            WorkflowState::Running => Phase::Running,
            WorkflowState::Succeeded(_) => Phase::Succeeded,
            WorkflowState::Failed(_) => Phase::Failed,
        }
    }
}

struct Completion<Res> {
    ticket: Ticket,
    outcome: AppResult<Res>,
}

pub struct WorkflowController<Req, Res> {
    name: &'static str,
    failure_message: &'static str,
    request_fn: RequestFn<Req, Res>,
    state: WorkflowState<Res>,
    issued: u64,
    last_error_detail: Option<String>,
    discarded: usize,
    tx: Sender<Completion<Res>>,
    rx: Receiver<Completion<Res>>,
}

impl<Req, Res> WorkflowController<Req, Res>
where
    Req: Send + 'static,
    Res: Send + 'static,
{
    /// `failure_message` is what users see when the operation fails; the
    /// underlying error is logged and kept in `last_error_detail`.
    pub fn new(
        name: &'static str,
        failure_message: &'static str,
        request_fn: impl Fn(Req) -> AppResult<Res> + Send + Sync + 'static,
    ) -> Self {
        let (tx, rx) = channel();
        Self {
            name,
            failure_message,
            request_fn: Arc::new(request_fn),
            state: WorkflowState::Idle,
            issued: 0,
            last_error_detail: None,
            discarded: 0,
            tx,
            rx,
        }
    }

    /// Clear the previous outcome, enter `Running` and start the operation.
    ///
    /// Supersedes any request still in flight.
    pub fn submit(&mut self, request: Req) -> Ticket {
        let ticket = self.begin();
        let tx = self.tx.clone();
        let request_fn = Arc::clone(&self.request_fn);

        let spawned = thread::Builder::new()
            .name(format!("{}-worker", self.name))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| request_fn(request)))
                    .unwrap_or_else(|_| Err(AppError::Worker("request panicked".to_string())));
                // The controller may be gone already; nobody is waiting then.
                let _ = tx.send(Completion { ticket, outcome });
            });

        if let Err(e) = spawned {
            self.settle(ticket, Err(AppError::Worker(e.to_string())));
        }
        ticket
    }

    fn begin(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.state = WorkflowState::Running;
        self.last_error_detail = None;
        tracing::info!(workflow = self.name, ticket = ticket.0, "request submitted");
        ticket
    }

    /// Apply an outcome. Returns false when `ticket` is not the latest one.
    fn settle(&mut self, ticket: Ticket, outcome: AppResult<Res>) -> bool {
        if ticket != Ticket(self.issued) {
            self.discarded += 1;
            tracing::debug!(
                workflow = self.name,
                ticket = ticket.0,
                latest = self.issued,
                "discarding superseded response"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                tracing::info!(workflow = self.name, ticket = ticket.0, "request succeeded");
                self.state = WorkflowState::Succeeded(result);
            }
            Err(e) => {
                tracing::warn!(workflow = self.name, ticket = ticket.0, error = %e, "request failed");
                self.last_error_detail = Some(e.to_string());
                self.state = WorkflowState::Failed(self.failure_message.to_string());
            }
        }
        true
    }

    /// Drain finished work without blocking. Returns true if the latest
    /// request settled during this call.
    pub fn poll(&mut self) -> bool {
        let mut settled = false;
        while let Ok(completion) = self.rx.try_recv() {
            settled |= self.settle(completion.ticket, completion.outcome);
        }
        settled
    }

    /// Block until the latest request settles or `timeout` elapses.
    ///
    /// Returns true when the controller is no longer running.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        self.poll();
        // A deadline past what `Instant` can represent means wait indefinitely.
        let deadline = Instant::now().checked_add(timeout);
        while self.is_running() {
            let received = match deadline {
                Some(deadline) => self
                    .rx
                    .recv_timeout(deadline.saturating_duration_since(Instant::now())),
                None => self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(completion) => {
                    self.settle(completion.ticket, completion.outcome);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        !self.is_running()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> &WorkflowState<Res> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, WorkflowState::Running)
    }

    pub fn result(&self) -> Option<&Res> {
        match &self.state {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn result_mut(&mut self) -> Option<&mut Res> {
        match &mut self.state {
            WorkflowState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// User-facing message of the latest failure.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn last_error_detail(&self) -> Option<&str> {
        self.last_error_detail.as_deref()
    }

    pub fn latest_ticket(&self) -> Option<Ticket> {
        (self.issued > 0).then_some(Ticket(self.issued))
    }

    /// Responses dropped because a newer request had been issued.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}
