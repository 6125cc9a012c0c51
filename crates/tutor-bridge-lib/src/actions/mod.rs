// Action Handlers
// The independently invocable operations exposed to the tutoring agent

pub mod agents;
pub mod deploy;
pub mod packages;
pub mod threads;

pub use agents::{get_agent_runbook, get_all_agents, update_agent_runbook};
pub use deploy::deploy_agent_to_desktop;
pub use packages::get_actions;
pub use threads::get_latest_thread;
