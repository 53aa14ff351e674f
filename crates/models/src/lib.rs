pub mod catalog;
pub mod forms;
pub mod import;
pub mod stats;
pub mod views;
