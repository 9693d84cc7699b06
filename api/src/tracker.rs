use std::{future::Future, time::Duration};

use futures::future::{select, Either};
use tokio_util::sync::CancellationToken;

use crate::{
    consts::STATUS_POLL_INTERVAL,
    dispatch::CallsTransport,
    status::{CallsId, CallsStatus},
    timer::Timer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerState {
    /// No batch submitted.
    Idle,
    /// Tracking id obtained, status not yet observed.
    Submitted(CallsId),
    /// Status observed at least once and still pending.
    Polling { id: CallsId, polls: u32 },
    Confirmed(CallsId),
    Failed(CallsId),
    TimedOut(CallsId),
    Cancelled(CallsId),
}

impl TrackerState {
    /// Whether a batch is in flight.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Submitted(_) | Self::Polling { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Confirmed,
    Failed,
    TimedOut,
    Cancelled,
}

/// Follows one submitted batch until it reaches a terminal status.
#[derive(Clone, Debug)]
pub struct ConfirmationTracker {
    state: TrackerState,
    interval: Duration,
    deadline: Option<Duration>,
}

impl ConfirmationTracker {
    /// Start tracking a freshly submitted batch.
    pub fn tracking(id: CallsId) -> Self {
        Self {
            state: TrackerState::Submitted(id),
            interval: STATUS_POLL_INTERVAL,
            deadline: None,
        }
    }

    /// Give up after roughly `deadline` of polling. Elapsed time is the sum of the poll
    /// intervals slept so far.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn id(&self) -> Option<&CallsId> {
        match &self.state {
            TrackerState::Idle => None,
            TrackerState::Submitted(id)
            | TrackerState::Polling { id, .. }
            | TrackerState::Confirmed(id)
            | TrackerState::Failed(id)
            | TrackerState::TimedOut(id)
            | TrackerState::Cancelled(id) => Some(id),
        }
    }

    /// Apply one observed status. Returns the outcome once the batch is terminal.
    pub fn observe(&mut self, status: CallsStatus) -> Option<PollOutcome> {
        let (id, polls) = match &self.state {
            TrackerState::Submitted(id) => (id.clone(), 0),
            TrackerState::Polling { id, polls } => (id.clone(), *polls),
            _ => return None,
        };
        match status {
            CallsStatus::Pending => {
                self.state = TrackerState::Polling {
                    id,
                    polls: polls + 1,
                };
                None
            }
            CallsStatus::Success => {
                self.state = TrackerState::Confirmed(id);
                Some(PollOutcome::Confirmed)
            }
            CallsStatus::Failure => {
                self.state = TrackerState::Failed(id);
                Some(PollOutcome::Failed)
            }
        }
    }

    fn finish<S>(&mut self, outcome: PollOutcome, on_state: &mut S) -> Option<PollOutcome>
    where
        S: FnMut(&TrackerState),
    {
        let id = self.id().cloned()?;
        self.state = match outcome {
            PollOutcome::Confirmed => TrackerState::Confirmed(id),
            PollOutcome::Failed => TrackerState::Failed(id),
            PollOutcome::TimedOut => TrackerState::TimedOut(id),
            PollOutcome::Cancelled => TrackerState::Cancelled(id),
        };
        on_state(&self.state);
        Some(outcome)
    }

    /// Poll the batch status until it is terminal, the deadline passes or `cancel` fires.
    ///
    /// The first query goes out immediately. Query failures are logged and polling goes
    /// on. Every state change is passed to `on_state`. Returns `None` when the batch has
    /// already finished.
    pub async fn run<T, M, S>(
        &mut self,
        transport: &T,
        timer: &M,
        cancel: &CancellationToken,
        mut on_state: S,
    ) -> Option<PollOutcome>
    where
        T: CallsTransport,
        M: Timer,
        S: FnMut(&TrackerState),
    {
        let id = match &self.state {
            TrackerState::Submitted(id) | TrackerState::Polling { id, .. } => id.clone(),
            _ => return None,
        };
        let mut elapsed = Duration::ZERO;

        loop {
            if cancel.is_cancelled() {
                return self.finish(PollOutcome::Cancelled, &mut on_state);
            }

            match transport.calls_status(&id).await {
                Ok(status) => {
                    let outcome = self.observe(status);
                    on_state(&self.state);
                    if let Some(outcome) = outcome {
                        tracing::info!("Batch {} finished: {:?}", id, outcome);
                        return Some(outcome);
                    }
                }
                Err(e) => tracing::warn!("Failed to fetch status of batch {}: {}", id, e),
            }

            if self.deadline.is_some_and(|deadline| elapsed >= deadline) {
                tracing::warn!("Batch {} still pending after {:?}", id, elapsed);
                return self.finish(PollOutcome::TimedOut, &mut on_state);
            }

            if !sleep_unless_cancelled(timer, self.interval, cancel).await {
                return self.finish(PollOutcome::Cancelled, &mut on_state);
            }
            elapsed += self.interval;
        }
    }
}

/// Track `id` to completion, reporting each state to `on_state` and running
/// `on_confirmed` exactly once if the batch succeeds.
pub async fn track_calls<T, M, S, F>(
    transport: &T,
    timer: &M,
    id: CallsId,
    cancel: &CancellationToken,
    deadline: Option<Duration>,
    mut on_state: S,
    on_confirmed: F,
) -> PollOutcome
where
    T: CallsTransport,
    M: Timer,
    S: FnMut(&TrackerState),
    F: FnOnce(),
{
    let mut tracker = ConfirmationTracker::tracking(id);
    if let Some(deadline) = deadline {
        tracker = tracker.with_deadline(deadline);
    }
    on_state(tracker.state());

    let outcome = tracker
        .run(transport, timer, cancel, on_state)
        .await
        .unwrap_or(PollOutcome::Cancelled);
    if outcome == PollOutcome::Confirmed {
        on_confirmed();
    }
    outcome
}

/// Run `refresh` now and then every `interval` until `cancel` fires.
pub async fn refresh_every<M, F, Fut>(
    timer: &M,
    interval: Duration,
    cancel: &CancellationToken,
    mut refresh: F,
) where
    M: Timer,
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    while !cancel.is_cancelled() {
        refresh().await;
        if !sleep_unless_cancelled(timer, interval, cancel).await {
            break;
        }
    }
}

/// Sleep for `duration`. Returns `false` if `cancel` fired first.
async fn sleep_unless_cancelled<M: Timer>(
    timer: &M,
    duration: Duration,
    cancel: &CancellationToken,
) -> bool {
    let sleep = std::pin::pin!(timer.sleep(duration));
    let cancelled = std::pin::pin!(cancel.cancelled());
    matches!(select(sleep, cancelled).await, Either::Left(_))
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::{
        consts::{CONFIRMATION_DEADLINE, REFRESH_INTERVAL},
        dispatch::mock::MockTransport,
        error::DonetteError,
        timer::TokioTimer,
    };

    /// Resolves immediately and records requested sleeps.
    #[derive(Default)]
    struct InstantTimer {
        slept: RefCell<Vec<Duration>>,
    }

    impl Timer for InstantTimer {
        fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
            self.slept.borrow_mut().push(duration);
            std::future::ready(())
        }
    }

    fn id() -> CallsId {
        CallsId("0xabc".to_string())
    }

    #[test]
    fn state_transitions() {
        let mut tracker = ConfirmationTracker::tracking(id());
        assert_eq!(tracker.state(), &TrackerState::Submitted(id()));
        assert!(tracker.state().is_active());

        assert_eq!(tracker.observe(CallsStatus::Pending), None);
        assert_eq!(tracker.observe(CallsStatus::Pending), None);
        assert_eq!(tracker.state(), &TrackerState::Polling { id: id(), polls: 2 });
        assert!(tracker.state().is_active());

        assert_eq!(tracker.observe(CallsStatus::Success), Some(PollOutcome::Confirmed));
        assert_eq!(tracker.state(), &TrackerState::Confirmed(id()));
        assert!(!tracker.state().is_active());

        // Confirmation is at most once.
        assert_eq!(tracker.observe(CallsStatus::Success), None);
        assert_eq!(tracker.id(), Some(&id()));
    }

    #[test]
    fn idle_is_not_active() {
        assert!(!TrackerState::Idle.is_active());
        assert!(!TrackerState::TimedOut(id()).is_active());
    }

    #[test]
    fn failure_is_terminal() {
        let mut tracker = ConfirmationTracker::tracking(id());
        assert_eq!(tracker.observe(CallsStatus::Failure), Some(PollOutcome::Failed));
        assert_eq!(tracker.state(), &TrackerState::Failed(id()));
        assert!(!tracker.state().is_active());
    }

    #[tokio::test]
    async fn finished_tracker_does_not_run_again() {
        let transport = MockTransport::default();
        let mut tracker = ConfirmationTracker::tracking(id());
        tracker.observe(CallsStatus::Success);

        let outcome = tracker
            .run(&transport, &InstantTimer::default(), &CancellationToken::new(), |_| {})
            .await;

        assert_eq!(outcome, None);
        assert_eq!(transport.queries(), 0);
    }

    #[tokio::test]
    async fn polls_until_success_then_refetches_once() {
        let transport = MockTransport::with_statuses([
            Ok(CallsStatus::Pending),
            Ok(CallsStatus::Pending),
            Ok(CallsStatus::Success),
            Ok(CallsStatus::Pending),
        ]);
        let timer = InstantTimer::default();
        let refetches = Cell::new(0);

        let outcome = track_calls(
            &transport,
            &timer,
            id(),
            &CancellationToken::new(),
            None,
            |_| {},
            || refetches.set(refetches.get() + 1),
        )
        .await;

        assert_eq!(outcome, PollOutcome::Confirmed);
        assert_eq!(refetches.get(), 1);
        assert_eq!(transport.queries(), 3);
        assert_eq!(*timer.slept.borrow(), vec![STATUS_POLL_INTERVAL; 2]);
    }

    #[tokio::test]
    async fn reports_every_state_in_order() {
        let transport = MockTransport::with_statuses([
            Ok(CallsStatus::Pending),
            Err(DonetteError::Transport("flaky".to_string())),
            Ok(CallsStatus::Pending),
            Ok(CallsStatus::Success),
        ]);
        let states = RefCell::new(Vec::new());

        let outcome = track_calls(
            &transport,
            &InstantTimer::default(),
            id(),
            &CancellationToken::new(),
            Some(CONFIRMATION_DEADLINE),
            |state: &TrackerState| states.borrow_mut().push(state.clone()),
            || {},
        )
        .await;

        assert_eq!(outcome, PollOutcome::Confirmed);
        assert_eq!(
            *states.borrow(),
            vec![
                TrackerState::Submitted(id()),
                TrackerState::Polling { id: id(), polls: 1 },
                TrackerState::Polling { id: id(), polls: 2 },
                TrackerState::Confirmed(id()),
            ]
        );
    }

    #[tokio::test]
    async fn status_errors_keep_polling() {
        let transport = MockTransport::with_statuses([
            Err(DonetteError::Transport("flaky".to_string())),
            Ok(CallsStatus::Pending),
            Ok(CallsStatus::Success),
        ]);
        let outcome = track_calls(
            &transport,
            &InstantTimer::default(),
            id(),
            &CancellationToken::new(),
            None,
            |_| {},
            || {},
        )
        .await;
        assert_eq!(outcome, PollOutcome::Confirmed);
        assert_eq!(transport.queries(), 3);
    }

    #[tokio::test]
    async fn failure_does_not_refetch() {
        let transport = MockTransport::with_statuses([Ok(CallsStatus::Failure)]);
        let refetched = Cell::new(false);
        let outcome = track_calls(
            &transport,
            &InstantTimer::default(),
            id(),
            &CancellationToken::new(),
            None,
            |_| {},
            || refetched.set(true),
        )
        .await;
        assert_eq!(outcome, PollOutcome::Failed);
        assert!(!refetched.get());
    }

    #[tokio::test]
    async fn deadline_times_out() {
        let transport = MockTransport::default();
        let last = RefCell::new(None);
        let refetched = Cell::new(false);

        let outcome = track_calls(
            &transport,
            &InstantTimer::default(),
            id(),
            &CancellationToken::new(),
            Some(Duration::from_secs(3)),
            |state: &TrackerState| *last.borrow_mut() = Some(state.clone()),
            || refetched.set(true),
        )
        .await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(*last.borrow(), Some(TrackerState::TimedOut(id())));
        assert!(!refetched.get());
        // Queries at 0s, 1s, 2s and 3s.
        assert_eq!(transport.queries(), 4);
    }

    #[tokio::test]
    async fn confirmation_deadline_allows_many_polls() {
        let transport = MockTransport::default();
        let outcome = track_calls(
            &transport,
            &InstantTimer::default(),
            id(),
            &CancellationToken::new(),
            Some(CONFIRMATION_DEADLINE),
            |_| {},
            || {},
        )
        .await;

        assert_eq!(outcome, PollOutcome::TimedOut);
        let polls = (CONFIRMATION_DEADLINE.as_millis() / STATUS_POLL_INTERVAL.as_millis()) as u32;
        assert_eq!(transport.queries(), polls + 1);
    }

    #[tokio::test]
    async fn cancellation_stops_polling() {
        let cancel = CancellationToken::new();
        let transport = MockTransport {
            cancel_after: Some((2, cancel.clone())),
            ..Default::default()
        };
        let refetched = Cell::new(false);

        let outcome = track_calls(
            &transport,
            &InstantTimer::default(),
            id(),
            &cancel,
            None,
            |_| {},
            || refetched.set(true),
        )
        .await;

        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(transport.queries(), 2);
        assert!(!refetched.get());
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_a_sleeping_poll() {
        let cancel = CancellationToken::new();
        let transport = MockTransport::default();
        let mut tracker = ConfirmationTracker::tracking(id());

        let teardown = async {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            cancel.cancel();
        };
        let (outcome, ()) = tokio::join!(
            tracker.run(&transport, &TokioTimer, &cancel, |_| {}),
            teardown
        );

        assert_eq!(outcome, Some(PollOutcome::Cancelled));
        assert_eq!(tracker.state(), &TrackerState::Cancelled(id()));
        // Queries at 0ms, 1000ms and 2000ms; none after the teardown at 2500ms.
        assert_eq!(transport.queries(), 3);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(transport.queries(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_runs_on_interval_until_cancelled() {
        let cancel = CancellationToken::new();
        let ticks = Cell::new(0u32);

        let teardown = async {
            tokio::time::sleep(Duration::from_millis(4500)).await;
            cancel.cancel();
        };
        let refresh = refresh_every(&TokioTimer, Duration::from_millis(2000), &cancel, || {
            ticks.set(ticks.get() + 1);
            async {}
        });
        tokio::join!(refresh, teardown);

        // Ticks at 0ms, 2000ms and 4000ms.
        assert_eq!(ticks.get(), 3);
    }

    #[tokio::test]
    async fn refresh_never_runs_when_already_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let ticks = Cell::new(0u32);
        refresh_every(&InstantTimer::default(), REFRESH_INTERVAL, &cancel, || {
            ticks.set(ticks.get() + 1);
            async {}
        })
        .await;
        assert_eq!(ticks.get(), 0);
    }
}
