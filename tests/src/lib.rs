//! Cross-crate integration and concurrency tests.
//!
//! Library crates in this workspace are `no_std`; the std test harness is
//! only linked here, which is where the threaded storms live.
#![cfg_attr(not(test), no_std)]

#[cfg(test)]
mod pipeline;
#[cfg(test)]
mod signal;
