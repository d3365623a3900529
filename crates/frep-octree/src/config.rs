//! Configuration for octree rendering.

/// Controls how a render call refines and parallelizes.
///
/// The defaults suit typical interactive use; turn `parallel` off for
/// deterministic single-threaded profiling. Results are identical either
/// way - sibling cells are independent, so execution order never shows up
/// in the output.
///
/// # Example
///
/// ```
/// use frep_octree::RenderConfig;
///
/// let config = RenderConfig::default()
///     .with_parallel(true)
///     .with_parallel_min_level(3);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to fan sibling subtrees out across rayon workers.
    pub parallel: bool,

    /// Minimum subdivision level at which to still fork workers.
    ///
    /// Below this level a subtree is small enough that spawn overhead
    /// outweighs the win; it is built sequentially on the current worker.
    pub parallel_min_level: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_min_level: 2,
        }
    }
}

impl RenderConfig {
    /// Sets whether sibling subtrees are built in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the level cutoff below which building stays sequential.
    #[must_use]
    pub fn with_parallel_min_level(mut self, level: u32) -> Self {
        self.parallel_min_level = level;
        self
    }
}
