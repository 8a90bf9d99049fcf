pub mod dashboard;
pub mod model;
pub mod session;
pub mod summarize;
