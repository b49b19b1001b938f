pub mod chrome;
pub mod prompt;
