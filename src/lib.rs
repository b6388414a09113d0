//! carecadence: a domiciliary-care visit scheduling engine.
//!
//! Organized in three layers: [`domain`] holds pure, I/O-free entities and
//! value objects; [`application`] orchestrates them behind port traits;
//! [`infrastructure`] implements those ports against concrete backends.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
