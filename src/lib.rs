pub mod bridge;
pub mod cli;
pub mod client;
pub mod config;
pub mod sim;

pub(crate) mod capabilities;

pub use bridge::{RunOutcome, ScriptBridge};
pub use client::{CommandResult, EntityInfo, EntityRef, Resolver, RobotClient};
