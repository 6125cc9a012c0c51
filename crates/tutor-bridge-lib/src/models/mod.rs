// Data Models
// Wire and document types shared across services

pub mod action;
pub mod agent;
pub mod assistant;

pub use action::*;
pub use agent::*;
pub use assistant::*;
