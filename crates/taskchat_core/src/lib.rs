pub mod commands;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod storage;
pub mod tasklist;
pub mod undo;
