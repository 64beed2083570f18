//! Focus Garden: a terminal Pomodoro timer that grows a plant while you
//! work and kills it if the terminal loses focus.

pub mod app;
pub mod config;
pub mod error;
pub mod garden;
pub mod ledger;
pub mod session;
pub mod ticker;
pub mod timer;
pub mod ui;

pub use error::{Error, Result};
