//! Bounded polling for task detail pages.
//!
//! A loop issues one request at a time, stops as soon as it observes a
//! settled value, backs off on failures and gives up after a fixed number of
//! consecutive failures. Each loop carries a [`PollToken`]; bumping the
//! owning [`PollHandle`] stops it and discards any response still in flight.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use dioxus_logger::tracing::{info, warn};
use molt_types::{FetchAttemptId, FetchRunDetailed, VerifyAttemptId, VerifyRunDetailed};

use crate::api::{ApiError, MoltApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval_ms: u32,
    pub max_consecutive_failures: u32,
    pub max_backoff_ms: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            max_consecutive_failures: 10,
            max_backoff_ms: 30_000,
        }
    }
}

impl PollPolicy {
    /// Delay before the next attempt after `failures` consecutive failures.
    pub fn backoff_ms(&self, failures: u32) -> u32 {
        if failures == 0 {
            return self.interval_ms;
        }
        let factor = 1u32.checked_shl(failures.saturating_sub(1)).unwrap_or(u32::MAX);
        self.interval_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    #[default]
    Idle,
    Loading,
    Settled,
    Errored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    Continue { delay_ms: u32 },
    Stop,
}

/// Phase bookkeeping for one loop.
#[derive(Debug, Clone)]
pub struct PollController {
    policy: PollPolicy,
    phase: PollPhase,
    failures: u32,
}

impl PollController {
    pub fn new(policy: PollPolicy) -> Self {
        Self {
            policy,
            phase: PollPhase::Idle,
            failures: 0,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn start(&mut self) {
        self.phase = PollPhase::Loading;
        self.failures = 0;
    }

    pub fn on_success(&mut self, settled: bool) -> PollDecision {
        self.failures = 0;
        if settled {
            self.phase = PollPhase::Settled;
            PollDecision::Stop
        } else {
            self.phase = PollPhase::Loading;
            PollDecision::Continue {
                delay_ms: self.policy.interval_ms,
            }
        }
    }

    pub fn on_failure(&mut self) -> PollDecision {
        self.failures = self.failures.saturating_add(1);
        if self.failures >= self.policy.max_consecutive_failures {
            self.phase = PollPhase::Errored;
            return PollDecision::Stop;
        }
        PollDecision::Continue {
            delay_ms: self.policy.backoff_ms(self.failures),
        }
    }
}

/// Owner side of the cancellation token. Cheap to clone; all clones share
/// one generation counter.
#[derive(Debug, Clone, Default)]
pub struct PollHandle {
    generation: Rc<Cell<u64>>,
}

impl PollHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every earlier token and hand out a fresh one.
    pub fn begin(&self) -> PollToken {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        PollToken {
            generation: self.generation.clone(),
            id: next,
        }
    }

    pub fn cancel(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }
}

#[derive(Debug, Clone)]
pub struct PollToken {
    generation: Rc<Cell<u64>>,
    id: u64,
}

impl PollToken {
    pub fn is_current(&self) -> bool {
        self.generation.get() == self.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent<T> {
    Data { value: T, phase: PollPhase },
    Failed { error: ApiError, phase: PollPhase },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Settled,
    Errored,
    Cancelled,
}

/// Run one poll loop to completion.
///
/// `fetch` is awaited serially; `sleep` waits between attempts so requests
/// never overlap. `on_update` sees every response that arrives while the
/// token is still current.
pub async fn drive<T, Fetch, FetchFut, Settled, Sleep, SleepFut, Update>(
    policy: &PollPolicy,
    token: &PollToken,
    mut fetch: Fetch,
    settled: Settled,
    mut sleep: Sleep,
    mut on_update: Update,
) -> PollOutcome
where
    Fetch: FnMut() -> FetchFut,
    FetchFut: Future<Output = Result<T, ApiError>>,
    Settled: Fn(&T) -> bool,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
    Update: FnMut(PollEvent<T>),
{
    let mut controller = PollController::new(policy.clone());
    controller.start();

    loop {
        if !token.is_current() {
            return PollOutcome::Cancelled;
        }

        let result = fetch().await;
        if !token.is_current() {
            return PollOutcome::Cancelled;
        }

        let decision = match result {
            Ok(value) => {
                let decision = controller.on_success(settled(&value));
                on_update(PollEvent::Data {
                    value,
                    phase: controller.phase(),
                });
                decision
            }
            Err(error) => {
                let decision = controller.on_failure();
                warn!(
                    "poll attempt failed ({} consecutive): {error}",
                    controller.failures()
                );
                on_update(PollEvent::Failed {
                    error,
                    phase: controller.phase(),
                });
                decision
            }
        };

        match decision {
            PollDecision::Continue { delay_ms } => sleep(delay_ms).await,
            PollDecision::Stop => {
                return match controller.phase() {
                    PollPhase::Errored => PollOutcome::Errored,
                    _ => PollOutcome::Settled,
                };
            }
        }
    }
}

/// Poll a fetch run until its status is terminal.
pub async fn poll_fetch_run<A, Sleep, SleepFut, Update>(
    api: &A,
    id: FetchAttemptId,
    policy: &PollPolicy,
    token: &PollToken,
    sleep: Sleep,
    on_update: Update,
) -> PollOutcome
where
    A: MoltApi,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
    Update: FnMut(PollEvent<FetchRunDetailed>),
{
    drive(
        policy,
        token,
        move || api.get_fetch_task(id),
        |run: &FetchRunDetailed| run.status.is_terminal(),
        sleep,
        on_update,
    )
    .await
}

pub async fn poll_verify_run<A, Sleep, SleepFut, Update>(
    api: &A,
    id: VerifyAttemptId,
    policy: &PollPolicy,
    token: &PollToken,
    sleep: Sleep,
    on_update: Update,
) -> PollOutcome
where
    A: MoltApi,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
    Update: FnMut(PollEvent<VerifyRunDetailed>),
{
    drive(
        policy,
        token,
        move || api.get_verify_task(id),
        |run: &VerifyRunDetailed| run.status.is_terminal(),
        sleep,
        on_update,
    )
    .await
}

/// Create a verify run for `fetch_id`, then poll the parent fetch until the
/// new run shows up among its verify runs.
pub async fn start_verify<A, Sleep, SleepFut, Update>(
    api: &A,
    fetch_id: FetchAttemptId,
    policy: &PollPolicy,
    token: &PollToken,
    sleep: Sleep,
    on_update: Update,
) -> Result<(VerifyAttemptId, PollOutcome), ApiError>
where
    A: MoltApi,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
    Update: FnMut(PollEvent<FetchRunDetailed>),
{
    let verify_id = api.create_verify_task(fetch_id).await?;
    info!("created verify run {verify_id} for fetch {fetch_id}");

    let outcome = drive(
        policy,
        token,
        move || api.get_fetch_task(fetch_id),
        move |run: &FetchRunDetailed| run.has_verify_run(verify_id),
        sleep,
        on_update,
    )
    .await;
    Ok((verify_id, outcome))
}

/// Keep refreshing the parent fetch until the linked verify run reaches a
/// terminal status, so its row in the fetch view stays current.
pub async fn follow_verify<A, Sleep, SleepFut, Update>(
    api: &A,
    fetch_id: FetchAttemptId,
    verify_id: VerifyAttemptId,
    policy: &PollPolicy,
    token: &PollToken,
    sleep: Sleep,
    on_update: Update,
) -> PollOutcome
where
    A: MoltApi,
    Sleep: FnMut(u32) -> SleepFut,
    SleepFut: Future<Output = ()>,
    Update: FnMut(PollEvent<FetchRunDetailed>),
{
    drive(
        policy,
        token,
        move || api.get_fetch_task(fetch_id),
        move |run: &FetchRunDetailed| {
            run.verify_run(verify_id)
                .is_some_and(|verify| verify.status.is_terminal())
        },
        sleep,
        on_update,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use molt_types::{CreateFetchTaskRequest, FetchRun, FetchStatsDetailed, RunStatus, VerifyRun};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct ScriptedApi {
        created: RefCell<Vec<CreateFetchTaskRequest>>,
        fetch_script: RefCell<VecDeque<Result<FetchRunDetailed, ApiError>>>,
        fetch_calls: Cell<usize>,
    }

    impl ScriptedApi {
        fn with_fetch_script(script: Vec<Result<FetchRunDetailed, ApiError>>) -> Self {
            Self {
                fetch_script: RefCell::new(script.into()),
                ..Default::default()
            }
        }
    }

    impl MoltApi for ScriptedApi {
        async fn list_fetch_tasks(&self) -> Result<Vec<FetchRun>, ApiError> {
            Ok(Vec::new())
        }

        async fn get_fetch_task(&self, _id: FetchAttemptId) -> Result<FetchRunDetailed, ApiError> {
            self.fetch_calls.set(self.fetch_calls.get() + 1);
            self.fetch_script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("script exhausted".into())))
        }

        async fn create_fetch_task(
            &self,
            body: &CreateFetchTaskRequest,
        ) -> Result<FetchAttemptId, ApiError> {
            self.created.borrow_mut().push(body.clone());
            Ok(42)
        }

        async fn create_verify_task(
            &self,
            _fetch_id: FetchAttemptId,
        ) -> Result<VerifyAttemptId, ApiError> {
            Ok(9)
        }

        async fn list_verify_tasks(&self) -> Result<Vec<VerifyRun>, ApiError> {
            Ok(Vec::new())
        }

        async fn get_verify_task(&self, id: VerifyAttemptId) -> Result<VerifyRunDetailed, ApiError> {
            Err(ApiError::Status {
                status: 404,
                message: format!("no verify run {id}"),
            })
        }
    }

    fn run(status: RunStatus, rows: i64) -> FetchRunDetailed {
        FetchRunDetailed {
            id: 42,
            name: "nightly".into(),
            status,
            started_at: 1_700_000_000,
            finished_at: if status.is_terminal() { 1_700_000_060 } else { 0 },
            stats: Some(FetchStatsDetailed {
                num_rows: rows,
                num_tables: 2,
                ..Default::default()
            }),
            logs: Vec::new(),
            verify_runs: Vec::new(),
        }
    }

    fn verify_summary(id: VerifyAttemptId) -> VerifyRun {
        VerifyRun {
            id,
            name: format!("verify-{id}"),
            status: RunStatus::InProgress,
            started_at: 1_700_000_100,
            finished_at: 0,
            fetch_id: 42,
        }
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = PollPolicy::default();
        assert_eq!(policy.backoff_ms(0), 1000);
        assert_eq!(policy.backoff_ms(1), 1000);
        assert_eq!(policy.backoff_ms(2), 2000);
        assert_eq!(policy.backoff_ms(4), 8000);
        assert_eq!(policy.backoff_ms(6), 30_000);
        assert_eq!(policy.backoff_ms(40), 30_000);
    }

    #[test]
    fn success_resets_failure_count() {
        let mut controller = PollController::new(PollPolicy::default());
        controller.start();
        controller.on_failure();
        controller.on_failure();
        assert_eq!(controller.failures(), 2);
        assert_eq!(
            controller.on_success(false),
            PollDecision::Continue { delay_ms: 1000 }
        );
        assert_eq!(controller.failures(), 0);
        assert_eq!(controller.phase(), PollPhase::Loading);
    }

    #[test]
    fn import_task_polls_until_success_then_stops() {
        let api = ScriptedApi::with_fetch_script(vec![
            Ok(run(RunStatus::InProgress, 10)),
            Ok(run(RunStatus::InProgress, 500)),
            Ok(run(RunStatus::Success, 1000)),
            Ok(run(RunStatus::Success, 9999)),
        ]);
        let mut form = crate::form::TaskFormState::default();
        form.name = "nightly".into();
        form.local_path = "/tmp/fetch".into();

        let handle = PollHandle::new();
        let token = handle.begin();
        let sleeps = RefCell::new(Vec::new());
        let mut seen = Vec::new();

        let outcome = block_on(async {
            let id = api.create_fetch_task(&form.to_request()).await.unwrap();
            poll_fetch_run(
                &api,
                id,
                &PollPolicy::default(),
                &token,
                |ms| {
                    sleeps.borrow_mut().push(ms);
                    async {}
                },
                |event| seen.push(event),
            )
            .await
        });

        assert_eq!(outcome, PollOutcome::Settled);
        assert_eq!(api.fetch_calls.get(), 3);
        assert_eq!(*sleeps.borrow(), vec![1000, 1000]);
        assert_eq!(api.created.borrow()[0].store, molt_types::StoreKind::Local);

        match seen.last() {
            Some(PollEvent::Data { value, phase }) => {
                assert_eq!(*phase, PollPhase::Settled);
                assert_eq!(value.stats.as_ref().map(|s| s.num_rows), Some(1000));
            }
            other => panic!("unexpected last event {other:?}"),
        }
    }

    #[test]
    fn consecutive_failures_end_in_errored() {
        let policy = PollPolicy {
            interval_ms: 10,
            max_consecutive_failures: 3,
            max_backoff_ms: 25,
        };
        let api = ScriptedApi::with_fetch_script(vec![]);
        let token = PollHandle::new().begin();
        let sleeps = RefCell::new(Vec::new());
        let mut phases = Vec::new();

        let outcome = block_on(poll_fetch_run(
            &api,
            1,
            &policy,
            &token,
            |ms| {
                sleeps.borrow_mut().push(ms);
                async {}
            },
            |event| {
                if let PollEvent::Failed { phase, .. } = event {
                    phases.push(phase);
                }
            },
        ));

        assert_eq!(outcome, PollOutcome::Errored);
        assert_eq!(api.fetch_calls.get(), 3);
        assert_eq!(*sleeps.borrow(), vec![10, 20]);
        assert_eq!(
            phases,
            vec![PollPhase::Loading, PollPhase::Loading, PollPhase::Errored]
        );
    }

    #[test]
    fn stale_token_stops_and_discards_in_flight_response() {
        let api = ScriptedApi::with_fetch_script(vec![
            Ok(run(RunStatus::InProgress, 1)),
            Ok(run(RunStatus::InProgress, 2)),
        ]);
        let handle = PollHandle::new();
        let token = handle.begin();
        let mut updates = 0;

        let outcome = block_on(drive(
            &PollPolicy::default(),
            &token,
            || {
                let response = api.get_fetch_task(1);
                // id changed while the first request was in flight
                handle.cancel();
                response
            },
            |run: &FetchRunDetailed| run.status.is_terminal(),
            |_| async {},
            |_| updates += 1,
        ));

        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(updates, 0);
        assert_eq!(api.fetch_calls.get(), 1);
    }

    #[test]
    fn begin_invalidates_previous_tokens() {
        let handle = PollHandle::new();
        let first = handle.begin();
        assert!(first.is_current());
        let second = handle.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
        handle.cancel();
        assert!(!second.is_current());
    }

    #[test]
    fn verify_poll_waits_for_linked_run() {
        let mut linked = run(RunStatus::Success, 1000);
        linked.verify_runs.push(verify_summary(9));
        let api = ScriptedApi::with_fetch_script(vec![
            Ok(run(RunStatus::Success, 1000)),
            Err(ApiError::Transport("offline".into())),
            Ok(linked),
        ]);
        let token = PollHandle::new().begin();

        let result = block_on(start_verify(
            &api,
            42,
            &PollPolicy::default(),
            &token,
            |_| async {},
            |_| {},
        ));

        assert_eq!(result, Ok((9, PollOutcome::Settled)));
        assert_eq!(api.fetch_calls.get(), 3);
    }

    #[test]
    fn linked_verify_row_refreshes_until_terminal() {
        let with_verify = |status: RunStatus| {
            let mut fetch = run(RunStatus::Success, 1000);
            let mut verify = verify_summary(9);
            verify.status = status;
            fetch.verify_runs.push(verify);
            fetch
        };
        let api = ScriptedApi::with_fetch_script(vec![
            Ok(with_verify(RunStatus::InProgress)),
            Ok(with_verify(RunStatus::InProgress)),
            Ok(with_verify(RunStatus::Success)),
            Ok(with_verify(RunStatus::Success)),
        ]);
        let token = PollHandle::new().begin();
        let mut statuses = Vec::new();

        let outcome = block_on(follow_verify(
            &api,
            42,
            9,
            &PollPolicy::default(),
            &token,
            |_| async {},
            |event| {
                if let PollEvent::Data { value, .. } = event {
                    statuses.push(value.verify_run(9).map(|v| v.status));
                }
            },
        ));

        assert_eq!(outcome, PollOutcome::Settled);
        assert_eq!(api.fetch_calls.get(), 3);
        assert_eq!(statuses.last(), Some(&Some(RunStatus::Success)));
    }
}
