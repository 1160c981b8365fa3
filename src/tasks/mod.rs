//! Background Tasks Module
//!
//! Contains the one background task owned by the cache service.
//!
//! # Tasks
//! - TTL Sweeper: removes expired entries from every namespace at a fixed interval

mod sweeper;

pub use sweeper::{Sweeper, SweeperState};
