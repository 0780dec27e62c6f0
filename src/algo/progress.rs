//! Progress reporting for field estimation.
//!
//! Estimation runs as a fixed sequence of passes. A [`Progress`] callback is
//! told about each pass once it has finished.
//!
//! # Example
//!
//! ```
//! use dgview::algo::Progress;
//!
//! let progress = Progress::new(|done, total, pass| {
//!     println!("[{}/{}] {}", done, total, pass);
//! });
//! progress.report(1, 3, "edge weights");
//! ```

/// A callback that receives updates while fields are estimated.
///
/// The callback receives:
/// - `done`: Number of completed passes (1-based)
/// - `total`: Total number of passes
/// - `pass`: Name of the pass that just completed
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, done: usize, total: usize, pass: &str) {
        (self.callback)(done, total, pass);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
