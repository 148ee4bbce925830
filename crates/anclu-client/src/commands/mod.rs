pub mod periods;
pub mod report;
pub mod session;
