// Library root: configuration and dashboard assembly, shared by the `honor`
// binary and the integration tests.

pub mod config;
pub mod dashboard;
