//! Wave-based concurrency scheduler

use super::execution::Execution;
use super::types::{
    ExecutionEvent, ExecutionReport, RATE_LIMITED, ResultRecord, SchedulerState,
};
use crate::config::ExecutorConfig;
use crate::core::cancellation::{CancelCause, CancelHandle, CancellationController, WaveScope};
use crate::core::credentials::CredentialResolver;
use crate::core::request::{RequestBuilder, RequestDraft};
use crate::core::status::{StatusReporter, StatusSuffix, WaveHeader};
use crate::core::transport::Transport;
use crate::utils::error::{PurgeError, Result};
use futures::future::join_all;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, error, info, info_span, warn};

const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// How one wave member's request ended
#[derive(Debug)]
enum Attempt {
    Responded(u16),
    Failed(PurgeError),
    Interrupted,
}

/// Message from a wave member to the aggregator
#[derive(Debug)]
struct Settlement {
    draft: RequestDraft,
    attempt: Attempt,
}

/// What the display surface last saw of the current wave
#[derive(Debug, Clone, Copy)]
struct WaveView {
    header: WaveHeader,
    size: usize,
    progress: usize,
}

impl WaveView {
    fn empty(total: usize) -> Self {
        Self {
            header: WaveHeader {
                total,
                wave: 0,
                planned_waves: 0,
                pending: 0,
            },
            size: 0,
            progress: 0,
        }
    }
}

/// Dispatches request drafts in waves of at most `max_concurrent`
///
/// A wave is fully settled before the next one starts. When any member of a
/// wave is rate limited the rest of the wave is interrupted, all of them are
/// queued for retry and the next wave waits out the backoff window. The
/// scheduler drives exactly one execution.
pub struct ConcurrencyScheduler {
    config: ExecutorConfig,
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
    resolver: Arc<dyn CredentialResolver>,
    cancellation: CancellationController,
    state: RwLock<SchedulerState>,
    submitted: AtomicBool,
    events: Option<mpsc::UnboundedSender<ExecutionEvent>>,
}

impl ConcurrencyScheduler {
    pub fn new(
        config: ExecutorConfig,
        builder: RequestBuilder,
        transport: Arc<dyn Transport>,
        resolver: Arc<dyn CredentialResolver>,
    ) -> Self {
        Self {
            config,
            builder,
            transport,
            resolver,
            cancellation: CancellationController::new(),
            state: RwLock::new(SchedulerState::Idle),
            submitted: AtomicBool::new(false),
            events: None,
        }
    }

    /// Deliver state changes and status texts to `events`
    pub fn with_events(mut self, events: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn state(&self) -> SchedulerState {
        *self.state.read()
    }

    /// Stop scheduling new waves and settle the execution as aborted
    pub fn cancel(&self) -> bool {
        self.cancellation.cancel()
    }

    /// Handle that cancels this scheduler from another task
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancellation.handle()
    }

    /// Run one execution over `ids` until every id has a result or the
    /// execution is cancelled
    ///
    /// Fails without dispatching anything when the credential cannot be
    /// resolved or a draft cannot be built. Every fatal error, before or
    /// during dispatch, leaves the scheduler `Aborted` and emits
    /// `Finished(Aborted)`. A second call fails with `AlreadySubmitted`
    /// and touches neither state nor events.
    pub async fn submit(&self, ids: Vec<String>) -> Result<ExecutionReport> {
        if self.submitted.swap(true, Ordering::AcqRel) {
            return Err(PurgeError::AlreadySubmitted);
        }

        self.execute(ids).await.inspect_err(|_| {
            self.set_state(SchedulerState::Aborted);
            self.emit(ExecutionEvent::Finished(SchedulerState::Aborted));
        })
    }

    async fn execute(&self, ids: Vec<String>) -> Result<ExecutionReport> {
        let token = self.resolver.resolve().await.inspect_err(|e| {
            error!("Failed to resolve credential: {}", e);
        })?;

        let drafts = self.builder.build_all(&ids, &token).inspect_err(|e| {
            error!("Failed to build request drafts: {}", e);
        })?;

        let mut execution = Execution::new(drafts);
        if execution.total() < ids.len() {
            debug!(
                duplicates = ids.len() - execution.total(),
                "dropped duplicate ids"
            );
        }

        let span = info_span!("execution", id = %execution.id, total = execution.total());
        let outcome = self
            .drive(&mut execution, &token)
            .instrument(span.clone())
            .await;

        match outcome {
            Ok((state, view)) => {
                self.finish(&execution, state, view);
                let report = execution.into_report(state);
                span.in_scope(|| {
                    info!(
                        state = %state,
                        succeeded = report.succeeded(),
                        failed = report.failed(),
                        unresolved = report.unresolved.len(),
                        waves = report.waves,
                        "execution finished"
                    );
                });
                Ok(report)
            }
            Err(e) => {
                span.in_scope(|| error!("execution failed: {}", e));
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        execution: &mut Execution,
        token: &str,
    ) -> Result<(SchedulerState, WaveView)> {
        let max = self.config.max_concurrent.max(1);
        let planned_waves = execution.total().div_ceil(max);
        let mut view = WaveView::empty(execution.total());

        loop {
            if self.cancellation.is_cancelled() {
                return Ok((SchedulerState::Aborted, view));
            }

            execution.merge_retry(&self.builder, token)?;
            if execution.queued() == 0 {
                return Ok((SchedulerState::Done, view));
            }

            self.set_state(SchedulerState::Running);
            let wave = execution.cut_wave(max);
            view = WaveView {
                header: WaveHeader {
                    total: execution.total(),
                    wave: execution.waves,
                    planned_waves,
                    pending: execution.pending_len(),
                },
                size: wave.len(),
                progress: 0,
            };

            view.progress = self.run_wave(execution, wave, &view).await;

            if self.cancellation.is_cancelled() {
                return Ok((SchedulerState::Aborted, view));
            }

            if execution.retry_len() > 0 && !self.back_off(execution, &view).await {
                return Ok((SchedulerState::Aborted, view));
            }
        }
    }

    /// Dispatch one wave and aggregate its settlements
    ///
    /// Returns how many terminal results the wave produced.
    async fn run_wave(
        &self,
        execution: &mut Execution,
        wave: Vec<RequestDraft>,
        view: &WaveView,
    ) -> usize {
        let scope = self.cancellation.wave_scope();
        let (tx, mut rx) = mpsc::unbounded_channel::<Settlement>();
        let recorded_before = execution.results().len();

        info!(
            wave = view.header.wave,
            size = wave.len(),
            pending = view.header.pending,
            "dispatching wave"
        );
        self.emit_status(execution, view, 0, None);

        let handles: Vec<_> = wave
            .into_iter()
            .map(|draft| {
                let transport = self.transport.clone();
                let scope = scope.clone();
                let tx = tx.clone();
                tokio::spawn(
                    async move {
                        let attempt = tokio::select! {
                            biased;
                            _ = scope.interrupted() => Attempt::Interrupted,
                            result = transport.send(&draft) => match result {
                                Ok(status) => Attempt::Responded(status),
                                Err(e) => Attempt::Failed(e),
                            },
                        };
                        let _ = tx.send(Settlement { draft, attempt });
                    }
                    .in_current_span(),
                )
            })
            .collect();
        drop(tx);

        while let Some(settlement) = rx.recv().await {
            self.settle(execution, &scope, settlement);
            let progress = execution.results().len() - recorded_before;
            self.emit_status(execution, view, progress, None);
        }

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                error!("wave member task failed: {}", e);
            }
        }

        for id in execution.stranded() {
            warn!(id = %id, "no settlement received, recording network error");
            execution.record(ResultRecord::network_error(id));
        }

        let progress = execution.results().len() - recorded_before;
        self.emit_status(execution, view, progress, None);
        debug!(
            wave = view.header.wave,
            recorded = progress,
            retry = execution.retry_len(),
            "wave settled"
        );
        progress
    }

    /// Apply one settlement to the execution
    fn settle(&self, execution: &mut Execution, scope: &WaveScope, settlement: Settlement) {
        let Settlement { draft, attempt } = settlement;

        if scope.is_globally_cancelled() {
            debug!(id = draft.id(), "discarding settlement after cancellation");
            execution.return_to_pending(draft);
            return;
        }

        match attempt {
            Attempt::Responded(RATE_LIMITED) => {
                if !scope.is_cancelled() {
                    warn!(id = draft.id(), "rate limited, interrupting wave");
                    scope.cancel();
                }
                execution.requeue_retry(draft.id());
            }
            Attempt::Responded(status) => {
                debug!(id = draft.id(), status, "response recorded");
                execution.record(ResultRecord::from_status(draft.id(), status));
            }
            Attempt::Failed(e) => match scope.cause() {
                Some(CancelCause::Wave) => execution.requeue_retry(draft.id()),
                Some(CancelCause::Global) => execution.return_to_pending(draft),
                None => {
                    warn!(id = draft.id(), "request failed: {}", e);
                    execution.record(ResultRecord::network_error(draft.id()));
                }
            },
            Attempt::Interrupted => match scope.cause() {
                Some(CancelCause::Global) => execution.return_to_pending(draft),
                _ => execution.requeue_retry(draft.id()),
            },
        }
    }

    /// Count down the backoff window; `false` when cancelled meanwhile
    async fn back_off(&self, execution: &mut Execution, view: &WaveView) -> bool {
        self.set_state(SchedulerState::BackingOff);
        execution.backoff_cycles += 1;
        let mut remaining = self.config.backoff();
        info!(
            seconds = remaining.as_secs(),
            retry = execution.retry_len(),
            "rate limit hit, backing off"
        );

        while !remaining.is_zero() {
            self.emit_status(
                execution,
                view,
                view.progress,
                Some(StatusSuffix::Countdown(remaining.as_secs())),
            );
            let tick = remaining.min(COUNTDOWN_TICK);
            tokio::select! {
                _ = self.cancellation.cancelled() => return false,
                _ = tokio::time::sleep(tick) => {}
            }
            remaining -= tick;
        }

        !self.cancellation.is_cancelled()
    }

    fn finish(&self, execution: &Execution, state: SchedulerState, view: WaveView) {
        let suffix = match state {
            SchedulerState::Aborted => StatusSuffix::Aborted,
            _ => StatusSuffix::Done,
        };
        self.set_state(state);
        self.emit_status(execution, &view, view.progress, Some(suffix));
        self.emit(ExecutionEvent::Finished(state));
    }

    fn set_state(&self, state: SchedulerState) {
        let previous = std::mem::replace(&mut *self.state.write(), state);
        if previous != state {
            debug!(from = %previous, to = %state, "scheduler state changed");
            self.emit(ExecutionEvent::StateChanged(state));
        }
    }

    fn emit_status(
        &self,
        execution: &Execution,
        view: &WaveView,
        progress: usize,
        suffix: Option<StatusSuffix>,
    ) {
        if self.events.is_none() {
            return;
        }
        let text = StatusReporter::compose(
            &view.header,
            execution.results(),
            view.size,
            || progress,
            suffix,
        );
        self.emit(ExecutionEvent::Status(text));
        self.emit(ExecutionEvent::Progress(execution.snapshot()));
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

impl std::fmt::Debug for ConcurrencyScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrencyScheduler")
            .field("config", &self.config)
            .field("builder", &self.builder)
            .field("state", &self.state())
            .finish()
    }
}
