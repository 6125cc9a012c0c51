// Utility functions module

pub mod paths;
