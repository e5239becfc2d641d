// AnnealPool scheduling engine
// Worker pool, work queues and completion observation

pub mod config;
pub mod evaluator;
pub mod log;
pub mod queue;
pub mod scheduler;

pub use config::SchedulerConfig;
pub use evaluator::{fn_evaluator, Evaluator, FnEvaluator};
pub use log::CompletionLog;
pub use queue::WorkQueue;
pub use scheduler::{Completion, RunSummary, Scheduler, StrategyHandle, StrategyId};
