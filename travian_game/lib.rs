pub mod account;
pub mod building_queue;
pub mod calculator;
pub mod driver;
pub mod executor;
pub mod game_state;
pub mod hero;
pub mod job;
pub mod scanner;
pub mod scheduler;
pub mod strategy;
pub mod village;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use account::Account;
pub use building_queue::{BuildingJob, BuildingQueue, QueueKey};
pub use calculator::TravianCalculator;
pub use driver::{Driver, DriverError};
pub use executor::{scan_game_state, Executor};
pub use game_state::GameState;
pub use hero::HeroInfo;
pub use job::{Job, JobKind, JobStatus};
pub use scanner::{Scanner, VillageIdentity};
pub use scheduler::ScheduledJobQueue;
pub use strategy::{BalancedEconomicGrowth, Strategy, StrategyConfig};
pub use village::Village;
