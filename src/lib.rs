pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod location;
pub mod phase;
pub mod phases;
pub mod plan;
pub mod planner;
pub mod sandbox;
pub mod scoring;
pub mod unit;

#[cfg(test)]
mod testing;

pub use config::StrategyConfig;
pub use engine::{Edge, GameEngine, TurnSnapshot};
pub use error::{StrategyError, StrategyResult};
pub use events::BreachHistory;
pub use location::Location;
pub use plan::{DeploymentOutcome, DeploymentRecord, DeploymentRequest};
pub use planner::{Strategy, StrategyBuilder, TurnReport};
pub use unit::{Currency, PlayerSide, ResourcePool, UnitKind};
