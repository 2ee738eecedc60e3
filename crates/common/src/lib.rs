//! Common functionality for the r2b2 bid adapter.
//!
//! This crate translates an auction's ad units into one `OpenRTB` bid request,
//! translates the bid server's response back into normalized bids, and builds
//! the user-sync URL that reports placements to the sync endpoint. It performs
//! no network I/O; sending requests and loading sync URLs is left to the host.
//!
//! # Modules
//!
//! - [`adapter`]: Adapter trait and the types shared with the auction framework
//! - [`constants`]: Endpoints and fixed bid values
//! - [`error`]: Error types and error handling utilities
//! - [`openrtb`]: `OpenRTB` request and bid payloads
//! - [`r2b2`]: The r2b2 adapter: request building, response parsing, user sync
//! - [`settings`]: Configuration management and validation
//! - [`test_support`]: Testing utilities

pub mod adapter;
pub mod constants;
pub mod error;
pub mod openrtb;
pub mod r2b2;
pub mod settings;
