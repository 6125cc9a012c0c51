// Action Listing Handler
// Exposes the desktop registry to the tutoring agent

use crate::config::Config;
use crate::error::BridgeResult;
use crate::models::{ActionPackages, InternalActionPackages};
use crate::services::ActionRegistry;

/// Available action servers on this desktop with their API specifications,
/// minus the caller's exclusions. Exclusion is exactly the supplied set;
/// nothing is hidden by default.
pub fn get_actions(
    config: &Config,
    internal_actions: &InternalActionPackages,
) -> BridgeResult<ActionPackages> {
    ActionRegistry::new(config.clone()).list_actions(internal_actions)
}
