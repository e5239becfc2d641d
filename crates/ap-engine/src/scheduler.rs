//! Strategy registry, work queues and the worker pool.
//!
//! A [`Scheduler`] owns a registry of strategies, a pending queue of
//! candidates awaiting evaluation and a completed queue for observers. During
//! [`Scheduler::run`] a fixed pool of scoped worker threads repeatedly pops a
//! pending job, evaluates it, hands the result to the owning strategy and,
//! while that strategy still has budget, enqueues its next proposal.
//!
//! Each strategy sits behind its own mutex so that `consume_result` and the
//! following `propose` form one step relative to that strategy, while
//! different strategies progress in parallel. Only one candidate per strategy
//! is ever pending or in flight.
//!
//! Lock order is registry, then strategy. Workers never take the registry
//! lock.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ap_optimizer::{Optimizer, Phase};
use ap_types::{validation_error, ApResult, BoundarySet, Candidate, ObjectiveTarget, SchedulerError};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::evaluator::{evaluate_guarded, Evaluator};
use crate::log::CompletionLog;
use crate::queue::WorkQueue;

/// Unique strategy identifier within a scheduler.
pub type StrategyId = Uuid;

type SharedOptimizer = Arc<Mutex<Box<dyn Optimizer>>>;

/// A registered strategy together with the evaluator that scores its
/// candidates.
#[derive(Clone)]
pub struct StrategyHandle {
    id: StrategyId,
    name: String,
    objective: ObjectiveTarget,
    strategy: SharedOptimizer,
    evaluator: Arc<dyn Evaluator>,
}

impl StrategyHandle {
    pub fn id(&self) -> StrategyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn objective(&self) -> ObjectiveTarget {
        self.objective
    }

    pub fn phase(&self) -> Phase {
        self.strategy.lock().phase()
    }

    pub fn best(&self) -> Option<Candidate> {
        self.strategy.lock().best().cloned()
    }

    pub fn history_len(&self) -> usize {
        self.strategy.lock().history().len()
    }

    /// Snapshot of the strategy's history in completion order.
    pub fn history(&self) -> Vec<Candidate> {
        self.strategy.lock().history().to_vec()
    }

    /// Runs `f` with the strategy locked.
    pub fn inspect<R>(&self, f: impl FnOnce(&dyn Optimizer) -> R) -> R {
        let guard = self.strategy.lock();
        f(&**guard)
    }
}

impl std::fmt::Debug for StrategyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("objective", &self.objective)
            .finish()
    }
}

/// A candidate waiting for evaluation.
struct Job {
    candidate: Candidate,
    handle: StrategyHandle,
}

/// A finished evaluation, as seen by observers of the completed queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub strategy_id: StrategyId,
    pub strategy_name: String,
    /// The evaluated candidate. A failed evaluation carries the objective's
    /// worst sentinel as its result.
    pub candidate: Candidate,
    pub failed: bool,
    pub worker: usize,
    pub completed_at: DateTime<Utc>,
}

/// Totals for one call to [`Scheduler::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Strategies seeded at the start of the run.
    pub strategies: usize,
    pub workers: usize,
    pub evaluations: usize,
    pub failed_evaluations: usize,
    pub elapsed: Duration,
}

/// Counters shared by the workers of one run.
struct RunState {
    live_strategies: AtomicUsize,
    evaluations: AtomicUsize,
    failed_evaluations: AtomicUsize,
}

enum Step {
    Continue(Candidate),
    Exhausted,
    Rejected,
}

/// Closes the pending queue if a worker unwinds, so the rest of the pool
/// drains and exits instead of waiting for a proposal that never comes.
struct CloseOnPanic<'a>(&'a WorkQueue<Job>);

impl Drop for CloseOnPanic<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.close();
        }
    }
}

struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Schedules candidate evaluations for many strategies over a worker pool.
///
/// Completions accumulate in the completed queue across runs until an
/// observer drains them with [`pop_completed`](Self::pop_completed) or
/// [`drain_completed`](Self::drain_completed). Callers that never observe
/// them should turn retention off with
/// [`set_retain_completions`](Self::set_retain_completions).
pub struct Scheduler {
    registry: Mutex<Vec<StrategyHandle>>,
    pending: WorkQueue<Job>,
    completed: WorkQueue<Completion>,
    retain_completions: AtomicBool,
    log: Mutex<Option<CompletionLog>>,
    running: AtomicBool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Vec::new()),
            pending: WorkQueue::new(),
            completed: WorkQueue::new(),
            retain_completions: AtomicBool::new(true),
            log: Mutex::new(None),
            running: AtomicBool::new(false),
        }
    }

    /// Adds a strategy to the registry. It takes part in the next `run`.
    pub fn register<O>(&self, strategy: O, evaluator: Arc<dyn Evaluator>) -> StrategyHandle
    where
        O: Optimizer + 'static,
    {
        let handle = StrategyHandle {
            id: Uuid::new_v4(),
            name: strategy.name().to_string(),
            objective: strategy.objective(),
            strategy: Arc::new(Mutex::new(Box::new(strategy))),
            evaluator,
        };
        self.registry.lock().push(handle.clone());
        debug!(strategy = %handle.name, id = %handle.id, "strategy registered");
        handle
    }

    /// Removes a strategy from the registry. Jobs already queued for it are
    /// still processed by a run in progress.
    pub fn unregister(&self, id: StrategyId) -> Option<StrategyHandle> {
        let mut registry = self.registry.lock();
        let index = registry.iter().position(|h| h.id == id)?;
        let handle = registry.remove(index);
        debug!(strategy = %handle.name, id = %handle.id, "strategy unregistered");
        Some(handle)
    }

    pub fn registered_count(&self) -> usize {
        self.registry.lock().len()
    }

    pub fn strategies(&self) -> Vec<StrategyHandle> {
        self.registry.lock().clone()
    }

    pub fn get(&self, id: StrategyId) -> Option<StrategyHandle> {
        self.registry.lock().iter().find(|h| h.id == id).cloned()
    }

    /// Writes every completion of subsequent runs to `path`. The boundary set
    /// supplies the header.
    pub fn enable_logging(&self, path: impl AsRef<Path>, boundaries: &BoundarySet) -> ApResult<()> {
        if boundaries.is_empty() {
            return Err(validation_error!("completion log needs at least one parameter"));
        }
        let log = CompletionLog::create(path, boundaries)?;
        *self.log.lock() = Some(log);
        Ok(())
    }

    pub fn disable_logging(&self) -> ApResult<()> {
        if let Some(mut log) = self.log.lock().take() {
            log.flush()?;
        }
        Ok(())
    }

    /// Whether finished evaluations are pushed to the completed queue. The
    /// completion log is written either way.
    pub fn set_retain_completions(&self, retain: bool) {
        self.retain_completions.store(retain, Ordering::Relaxed);
    }

    pub fn retains_completions(&self) -> bool {
        self.retain_completions.load(Ordering::Relaxed)
    }

    pub fn pop_completed(&self) -> Option<Completion> {
        self.completed.try_pop()
    }

    pub fn drain_completed(&self) -> Vec<Completion> {
        self.completed.drain()
    }

    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }

    /// The best candidate across every registered strategy, judged by
    /// `objective`.
    pub fn best_overall(&self, objective: ObjectiveTarget) -> Option<Candidate> {
        let bests: Vec<Candidate> = self
            .registry
            .lock()
            .iter()
            .filter_map(StrategyHandle::best)
            .collect();
        objective.select_best(&bests).cloned()
    }

    /// Seeds every fresh strategy and evaluates until all of them are
    /// exhausted.
    ///
    /// Only strategies with an empty history are seeded. If a worker panics
    /// outside the evaluator the run ends with
    /// [`SchedulerError::WorkerPanicked`], and strategies that were still
    /// running keep their partial history without being exhausted. Later
    /// runs do not resume them; register a fresh strategy instead.
    #[tracing::instrument(level = "info", skip(self))]
    pub fn run(&self, worker_count: usize) -> ApResult<RunSummary> {
        if worker_count == 0 {
            return Err(SchedulerError::InvalidWorkerCount { worker_count }.into());
        }
        if self.running.swap(true, Ordering::AcqRel) {
            return Err(SchedulerError::AlreadyRunning.into());
        }
        let _running = RunningGuard(&self.running);
        let started = Instant::now();

        let seeds = self.seed_jobs();
        let state = RunState {
            live_strategies: AtomicUsize::new(seeds.len()),
            evaluations: AtomicUsize::new(0),
            failed_evaluations: AtomicUsize::new(0),
        };
        info!(
            strategies = seeds.len(),
            workers = worker_count,
            "starting optimisation run"
        );

        if seeds.is_empty() {
            return Ok(self.summarize(&state, 0, worker_count, started));
        }

        let strategies = seeds.len();
        self.pending.reopen();
        for job in seeds {
            self.pending.push(job);
        }

        let mut panicked = None;
        thread::scope(|scope| {
            let workers: Vec<_> = (0..worker_count)
                .map(|worker| {
                    let state = &state;
                    thread::Builder::new()
                        .name(format!("annealpool-worker-{worker}"))
                        .spawn_scoped(scope, move || self.work(worker, state))
                })
                .collect();

            for (worker, spawned) in workers.into_iter().enumerate() {
                let joined = match spawned {
                    Ok(handle) => handle.join().is_ok(),
                    Err(e) => {
                        error!(worker, error = %e, "failed to spawn worker");
                        false
                    }
                };
                if !joined {
                    self.pending.close();
                    panicked.get_or_insert(worker);
                }
            }
        });

        let leftover = self.pending.drain();
        if !leftover.is_empty() {
            warn!(jobs = leftover.len(), "discarding pending jobs after run");
        }
        if let Some(log) = self.log.lock().as_mut() {
            log.flush()?;
        }
        if let Some(worker) = panicked {
            return Err(SchedulerError::WorkerPanicked { worker }.into());
        }

        let summary = self.summarize(&state, strategies, worker_count, started);
        info!(
            evaluations = summary.evaluations,
            failed = summary.failed_evaluations,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "optimisation run finished"
        );
        Ok(summary)
    }

    /// One proposal per registered strategy that has not started yet.
    fn seed_jobs(&self) -> Vec<Job> {
        let registry = self.registry.lock();
        registry
            .iter()
            .filter_map(|handle| {
                let mut strategy = handle.strategy.lock();
                if strategy.is_exhausted() || !strategy.history().is_empty() {
                    debug!(strategy = %handle.name, phase = ?strategy.phase(), "not seeding strategy");
                    return None;
                }
                Some(Job {
                    candidate: strategy.propose(),
                    handle: handle.clone(),
                })
            })
            .collect()
    }

    fn work(&self, worker: usize, state: &RunState) {
        let _close = CloseOnPanic(&self.pending);
        while let Some(job) = self.pending.pop_blocking() {
            self.process(worker, job, state);
        }
        debug!(worker, "worker exiting");
    }

    fn process(&self, worker: usize, job: Job, state: &RunState) {
        let Job { candidate, handle } = job;

        let (value, failed) = match evaluate_guarded(handle.evaluator.as_ref(), &candidate) {
            Ok(value) => (value, false),
            Err(e) => {
                warn!(
                    strategy = %handle.name,
                    candidate = %candidate,
                    error = %e,
                    "evaluation failed, recording worst sentinel"
                );
                (handle.objective.worst_sentinel(), true)
            }
        };
        let evaluated = candidate.with_result(value);

        let step = {
            let mut strategy = handle.strategy.lock();
            match strategy.consume_result(evaluated.clone()) {
                Ok(Phase::Exhausted) => Step::Exhausted,
                Ok(_) => Step::Continue(strategy.propose()),
                Err(e) => {
                    error!(strategy = %handle.name, error = %e, "dropping result");
                    Step::Rejected
                }
            }
        };
        if matches!(step, Step::Rejected) {
            return;
        }

        state.evaluations.fetch_add(1, Ordering::Relaxed);
        if failed {
            state.failed_evaluations.fetch_add(1, Ordering::Relaxed);
        }
        debug!(worker, strategy = %handle.name, candidate = %evaluated, "evaluation completed");
        self.record_completion(worker, &handle, evaluated, failed);

        match step {
            Step::Continue(next) => self.pending.push(Job {
                candidate: next,
                handle,
            }),
            Step::Exhausted => {
                info!(
                    strategy = %handle.name,
                    best = ?handle.best().and_then(|c| c.result()),
                    "strategy exhausted"
                );
                if state.live_strategies.fetch_sub(1, Ordering::AcqRel) == 1 {
                    self.pending.close();
                }
            }
            Step::Rejected => {}
        }
    }

    fn record_completion(&self, worker: usize, handle: &StrategyHandle, candidate: Candidate, failed: bool) {
        if let Some(log) = self.log.lock().as_mut() {
            if let Err(e) = log.append(&candidate) {
                warn!(path = %log.path().display(), error = %e, "failed to write completion log");
            }
        }
        if !self.retains_completions() {
            return;
        }
        self.completed.push(Completion {
            strategy_id: handle.id,
            strategy_name: handle.name.clone(),
            candidate,
            failed,
            worker,
            completed_at: Utc::now(),
        });
    }

    fn summarize(&self, state: &RunState, strategies: usize, workers: usize, started: Instant) -> RunSummary {
        RunSummary {
            strategies,
            workers,
            evaluations: state.evaluations.load(Ordering::Relaxed),
            failed_evaluations: state.failed_evaluations.load(Ordering::Relaxed),
            elapsed: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::fn_evaluator;
    use ap_optimizer::{AnnealingConfig, AnnealingStrategy, RandomSearch, RandomSearchConfig};
    use ap_types::{ApError, EvaluationError, StrategyError};
    use tempfile::TempDir;

    fn interval(lower: f64, upper: f64) -> Arc<BoundarySet> {
        Arc::new(BoundarySet::new().with_boundary(lower, upper, "X").unwrap())
    }

    fn square() -> Arc<dyn Evaluator> {
        Arc::new(fn_evaluator(|c: &Candidate| Ok(c.get_parameter("X")?.powi(2))))
    }

    fn annealer(lower: f64, upper: f64, max: usize, seed: u64) -> AnnealingStrategy {
        let config = AnnealingConfig::new(max, ObjectiveTarget::Minimize)
            .with_cooling_factor(0.9)
            .with_start_chance(0.25)
            .with_seed(seed);
        AnnealingStrategy::new(interval(lower, upper), config)
            .unwrap()
            .with_name(format!("sa-{seed}"))
    }

    /// Four quarters of [-5, 5], each with its own annealer.
    fn quarters(scheduler: &Scheduler, max: usize) -> Vec<StrategyHandle> {
        [(-5.0, -2.5), (-2.5, 0.0), (0.0, 2.5), (2.5, 5.0)]
            .into_iter()
            .enumerate()
            .map(|(i, (lo, hi))| scheduler.register(annealer(lo, hi, max, i as u64 + 1), square()))
            .collect()
    }

    #[test]
    fn run_exhausts_every_strategy() {
        let scheduler = Scheduler::new();
        let handles = quarters(&scheduler, 20);

        let summary = scheduler.run(3).unwrap();

        assert_eq!(summary.strategies, 4);
        assert_eq!(summary.workers, 3);
        assert_eq!(summary.evaluations, 4 * 21);
        assert_eq!(summary.failed_evaluations, 0);
        for handle in &handles {
            assert_eq!(handle.phase(), Phase::Exhausted);
            assert_eq!(handle.history_len(), 21);
        }
        assert_eq!(scheduler.completed_len(), 4 * 21);
    }

    #[test]
    fn best_overall_comes_from_a_quarter_touching_zero() {
        let scheduler = Scheduler::new();
        let handles = quarters(&scheduler, 75);
        scheduler.run(4).unwrap();

        let best = scheduler.best_overall(ObjectiveTarget::Minimize).unwrap();
        let x = best.get_parameter("X").unwrap();
        assert!((-2.5..=2.5).contains(&x), "best X = {x}");
        assert!(best.result().unwrap() < 6.25);

        for handle in &handles {
            let own = handle.best().unwrap().result().unwrap();
            assert!(best.result().unwrap() <= own);
        }
    }

    #[test]
    fn histories_do_not_depend_on_worker_count() {
        let histories = |workers: usize| {
            let scheduler = Scheduler::new();
            let handles = quarters(&scheduler, 30);
            scheduler.run(workers).unwrap();
            handles.iter().map(StrategyHandle::history).collect::<Vec<_>>()
        };

        assert_eq!(histories(1), histories(8));
    }

    #[test]
    fn completions_are_attributed_to_their_strategy() {
        let scheduler = Scheduler::new();
        let handles = quarters(&scheduler, 5);
        scheduler.run(2).unwrap();

        let completions = scheduler.drain_completed();
        assert_eq!(completions.len(), 4 * 6);
        assert!(scheduler.pop_completed().is_none());

        for handle in &handles {
            let own: Vec<Candidate> = completions
                .iter()
                .filter(|c| c.strategy_id == handle.id())
                .map(|c| c.candidate.clone())
                .collect();
            assert_eq!(own, handle.history());
            assert!(completions
                .iter()
                .filter(|c| c.strategy_id == handle.id())
                .all(|c| c.strategy_name == handle.name() && c.worker < 2 && !c.failed));
        }
    }

    #[test]
    fn failed_evaluations_record_the_worst_sentinel() {
        let scheduler = Scheduler::new();
        let failing: Arc<dyn Evaluator> = Arc::new(fn_evaluator(|c: &Candidate| {
            let x = c.get_parameter("X")?;
            if x < 0.0 {
                Err(EvaluationError::new("negative input"))
            } else {
                Ok(x)
            }
        }));
        let config = RandomSearchConfig::new(10, ObjectiveTarget::Minimize).with_seed(7);
        let handle = scheduler.register(
            RandomSearch::new(interval(-1.0, -0.5), config).unwrap().with_name("doomed"),
            failing,
        );

        let summary = scheduler.run(2).unwrap();

        assert_eq!(summary.evaluations, 11);
        assert_eq!(summary.failed_evaluations, 11);
        assert_eq!(handle.phase(), Phase::Exhausted);
        assert!(handle
            .history()
            .iter()
            .all(|c| c.result() == Some(f64::INFINITY)));
        assert!(scheduler.drain_completed().iter().all(|c| c.failed));
    }

    #[test]
    fn panicking_evaluator_does_not_stop_the_run() {
        let scheduler = Scheduler::new();
        let boom: Arc<dyn Evaluator> = Arc::new(fn_evaluator(
            |_: &Candidate| -> Result<f64, EvaluationError> { panic!("objective blew up") },
        ));
        let config = RandomSearchConfig::new(3, ObjectiveTarget::Maximize).with_seed(1);
        let handle = scheduler.register(RandomSearch::new(interval(0.0, 1.0), config).unwrap(), boom);
        quarters(&scheduler, 3);

        let summary = scheduler.run(2).unwrap();

        assert_eq!(summary.evaluations, 5 * 4);
        assert_eq!(summary.failed_evaluations, 4);
        assert_eq!(handle.best().unwrap().result(), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let scheduler = Scheduler::new();
        quarters(&scheduler, 5);
        let err = scheduler.run(0).unwrap_err();
        assert!(matches!(
            err,
            ApError::Scheduler(SchedulerError::InvalidWorkerCount { worker_count: 0 })
        ));
    }

    #[test]
    fn empty_registry_returns_immediately() {
        let summary = Scheduler::new().run(4).unwrap();
        assert_eq!(summary.strategies, 0);
        assert_eq!(summary.evaluations, 0);
    }

    #[test]
    fn exhausted_strategies_are_not_seeded_again() {
        let scheduler = Scheduler::new();
        let first = quarters(&scheduler, 4);
        scheduler.run(2).unwrap();
        scheduler.drain_completed();

        let late = scheduler.register(annealer(-1.0, 1.0, 4, 99), square());
        let summary = scheduler.run(2).unwrap();

        assert_eq!(summary.strategies, 1);
        assert_eq!(summary.evaluations, 5);
        assert_eq!(late.history_len(), 5);
        assert!(first.iter().all(|h| h.history_len() == 5));
    }

    #[test]
    fn registry_queries_and_unregister() {
        let scheduler = Scheduler::new();
        let handles = quarters(&scheduler, 3);
        assert_eq!(scheduler.registered_count(), 4);
        assert_eq!(scheduler.get(handles[1].id()).unwrap().name(), "sa-2");

        let removed = scheduler.unregister(handles[0].id()).unwrap();
        assert_eq!(removed.id(), handles[0].id());
        assert_eq!(scheduler.registered_count(), 3);
        assert!(scheduler.get(handles[0].id()).is_none());
        assert!(scheduler.unregister(handles[0].id()).is_none());

        let summary = scheduler.run(2).unwrap();
        assert_eq!(summary.strategies, 3);
        assert_eq!(handles[0].history_len(), 0);
    }

    #[test]
    fn completion_log_has_one_line_per_evaluation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("completions.log");

        let scheduler = Scheduler::new();
        quarters(&scheduler, 9);
        scheduler.enable_logging(&path, &interval(-5.0, 5.0)).unwrap();
        let summary = scheduler.run(3).unwrap();
        scheduler.disable_logging().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("X\tresult"));
        let values: Vec<&str> = lines.collect();
        assert_eq!(values.len(), summary.evaluations);
        assert!(values.iter().all(|l| l.split('\t').count() == 2));
    }

    #[test]
    fn logging_without_parameters_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = Scheduler::new()
            .enable_logging(dir.path().join("empty.log"), &BoundarySet::new())
            .unwrap_err();
        assert!(matches!(err, ApError::Validation(_)));
    }

    #[test]
    fn completions_can_be_left_unqueued() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("completions.log");

        let scheduler = Scheduler::new();
        scheduler.set_retain_completions(false);
        assert!(!scheduler.retains_completions());
        quarters(&scheduler, 4);
        scheduler.enable_logging(&path, &interval(-5.0, 5.0)).unwrap();

        let summary = scheduler.run(2).unwrap();
        scheduler.disable_logging().unwrap();

        assert_eq!(summary.evaluations, 4 * 5);
        assert_eq!(scheduler.completed_len(), 0);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1 + summary.evaluations);
    }

    /// Random search whose n-th proposal panics.
    struct FailingProposals {
        inner: RandomSearch,
        proposals: usize,
        panic_at: usize,
    }

    impl Optimizer for FailingProposals {
        fn propose(&mut self) -> Candidate {
            self.proposals += 1;
            if self.proposals == self.panic_at {
                panic!("proposal generator failed");
            }
            self.inner.propose()
        }

        fn consume_result(&mut self, candidate: Candidate) -> Result<Phase, StrategyError> {
            self.inner.consume_result(candidate)
        }

        fn tracker(&self) -> &ap_optimizer::HistoryTracker {
            self.inner.tracker()
        }
    }

    #[test]
    fn worker_panic_leaves_running_strategies_unseeded() {
        let scheduler = Scheduler::new();
        let config = RandomSearchConfig::new(10, ObjectiveTarget::Minimize).with_seed(3);
        let handle = scheduler.register(
            FailingProposals {
                inner: RandomSearch::new(interval(0.0, 1.0), config).unwrap(),
                proposals: 0,
                panic_at: 3,
            },
            square(),
        );

        let err = scheduler.run(1).unwrap_err();
        assert!(matches!(
            err,
            ApError::Scheduler(SchedulerError::WorkerPanicked { worker: 0 })
        ));
        assert_eq!(handle.phase(), Phase::Running);
        assert_eq!(handle.history_len(), 2);

        let summary = scheduler.run(2).unwrap();
        assert_eq!(summary.strategies, 0);
        assert_eq!(summary.evaluations, 0);
        assert_eq!(handle.history_len(), 2);
    }

    #[test]
    fn inspect_exposes_strategy_state() {
        let scheduler = Scheduler::new();
        let handle = scheduler.register(annealer(0.0, 1.0, 2, 5), square());
        scheduler.run(1).unwrap();

        let (max, exhausted) = handle.inspect(|s| (s.max_calculations(), s.is_exhausted()));
        assert_eq!(max, 2);
        assert!(exhausted);
    }
}
