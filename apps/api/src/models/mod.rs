pub mod cv;
pub mod presentation;
pub mod suggestion;
