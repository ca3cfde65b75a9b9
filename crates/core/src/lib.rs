//! Core allocation logic for Fairshare.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `allocation` - Proportional split of a total using the Largest Remainder Method

pub mod allocation;
