//! Rick&Morty - habit tracking with moods
//!
//! Track daily, weekly and monthly habits, keep streaks alive and unlock
//! rewards along the way. Two UI modes (Personal Growth and Action) switch the
//! color theme.
//!
//! ## Core
//!
//! - [`stats`] computes streaks, calendar grids and summary statistics, and
//!   evaluates reward rules.
//! - [`tracker::HabitTracker`] holds the application state. Every mutation
//!   refreshes the streak and evaluates rewards, returning events to show.
//!
//! Storage, the remote update hook and login are async collaborators behind
//! traits so the core stays synchronous.

pub mod auth;
pub mod community;
pub mod config;
pub mod domain;
pub mod export;
pub mod remote;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use domain::*;
