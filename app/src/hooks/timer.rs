#[cfg(target_arch = "wasm32")]
use std::{future::Future, time::Duration};

#[cfg(target_arch = "wasm32")]
use donette_api::timer::Timer;

/// Browser event-loop timer.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct AppTimer;

#[cfg(target_arch = "wasm32")]
impl Timer for AppTimer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use donette_api::timer::TokioTimer as AppTimer;
