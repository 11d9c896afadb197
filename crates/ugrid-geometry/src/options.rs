//! Execution options for per-face geometry builds.

/// Controls whether per-face work is spread over the rayon thread pool.
///
/// # Example
///
/// ```
/// use ugrid_geometry::BuildOptions;
///
/// let options = BuildOptions::default().with_parallel_threshold(10_000);
/// assert!(options.parallel);
///
/// let serial = BuildOptions::serial();
/// assert!(!serial.use_parallel(1_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Whether to use parallel processing (via rayon).
    pub parallel: bool,
    /// Minimum number of faces before the parallel path is taken.
    pub parallel_threshold: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 1024,
        }
    }
}

impl BuildOptions {
    /// Options that never leave the calling thread.
    #[must_use]
    pub const fn serial() -> Self {
        Self {
            parallel: false,
            parallel_threshold: usize::MAX,
        }
    }

    /// Enable or disable parallel processing.
    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the face count at which parallel processing kicks in.
    #[must_use]
    pub const fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether a build over `num_faces` faces should run in parallel.
    #[inline]
    #[must_use]
    pub const fn use_parallel(&self, num_faces: usize) -> bool {
        self.parallel && num_faces >= self.parallel_threshold
    }
}
