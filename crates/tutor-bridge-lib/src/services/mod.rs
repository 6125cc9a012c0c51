// Services module
// Business logic over the desktop registry and the assistant service

pub mod assistant;
pub mod deploy;
pub mod registry;
pub mod summary;

pub use assistant::AssistantClient;
pub use deploy::AgentDeployer;
pub use registry::ActionRegistry;
