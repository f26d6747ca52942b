#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod policy;
pub mod schedule;
pub mod time;

pub use time::Clock;
