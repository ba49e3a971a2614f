//! Performance instrumentation for input hot paths.
//!
//! Pointer moves arrive at display rate during drags and pans, and every one
//! rebuilds part of the scene. Enable the `profiling` feature to time them:
//!
//! ```toml
//! [dependencies]
//! funnel-canvas = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn update(&mut self) {
//!     profile_scope!("drag_update");
//!     // ...
//! }
//! ```

use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::warn;

/// Budget for one frame at 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// RAII timer that reports its scope's duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

impl ScopedTimer {
    /// Warn when the scope takes longer than `threshold_ms`
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let depth = d.get();
            d.set(depth + 1);
            depth
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer used by `profile_scope!`: traces every scope
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 0.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            if elapsed_ms >= self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.3}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

/// Measure execution time of a closure and return both the result and elapsed time.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}

/// Measure execution time and warn if it exceeds the threshold.
#[inline]
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> T {
    let (result, elapsed_ms) = measure(f);
    if elapsed_ms > threshold_ms {
        warn!(
            operation = name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", threshold_ms),
            "Slow operation"
        );
    }
    result
}
