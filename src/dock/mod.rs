pub mod completion;
pub mod host;
pub mod transition;
