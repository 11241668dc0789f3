//! Bridge from the blocking entry points to the async core

use std::future::Future;

use tokio::runtime::{Builder, Handle};

/// Run a future to completion from synchronous code.
///
/// Inside a multi-thread tokio runtime the current worker is parked via
/// `block_in_place`; outside any runtime a throwaway current-thread runtime
/// drives the future. Calling this from a current-thread runtime panics
/// (tokio forbids blocking there); use the async form instead.
pub fn block_on<F: Future>(future: F) -> F::Output {
    match Handle::try_current() {
        Ok(handle) => tokio::task::block_in_place(|| handle.block_on(future)),
        Err(_) => Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("Failed to build blocking runtime")
            .block_on(future),
    }
}
