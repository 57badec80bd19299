//! Progress reporting for dataset builds.
//!
//! Tree construction and traversal are pure in-memory operations, so
//! progress here is item-driven rather than byte-driven: conversations
//! inserted during the build phase, nodes visited during extraction.
//! Reporting is an injectable, side-effect-only callback; it never alters
//! the ordering or content of results.
//!
//! # Example
//!
//! ```rust
//! use convopack::progress::{Phase, Progress, ProgressCallback};
//! use std::sync::Arc;
//!
//! let callback: ProgressCallback = Arc::new(|progress| {
//!     if let Some(pct) = progress.percentage() {
//!         eprintln!("{:?}: {:.0}%", progress.phase, pct);
//!     }
//! });
//!
//! callback(Progress::new(Phase::BuildingTree, 5, Some(10)));
//! ```

use std::sync::Arc;

/// The pipeline stage a [`Progress`] update refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Inserting conversations into the tree.
    #[default]
    BuildingTree,
    /// Traversing the completed tree and emitting examples.
    Extracting,
}

/// A point-in-time progress snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Progress {
    /// The stage this update refers to.
    pub phase: Phase,

    /// Number of items (conversations or nodes) processed so far.
    pub items_processed: usize,

    /// Total items in this phase, if known.
    pub total_items: Option<usize>,
}

impl Progress {
    /// Creates a new progress snapshot.
    pub fn new(phase: Phase, items_processed: usize, total_items: Option<usize>) -> Self {
        Self {
            phase,
            items_processed,
            total_items,
        }
    }

    /// Returns the progress as a percentage (0.0 - 100.0).
    ///
    /// Returns `None` if the total is not known.
    ///
    /// # Example
    ///
    /// ```rust
    /// use convopack::progress::{Phase, Progress};
    ///
    /// let progress = Progress::new(Phase::Extracting, 50, Some(100));
    /// assert_eq!(progress.percentage(), Some(50.0));
    ///
    /// let unknown = Progress::new(Phase::Extracting, 50, None);
    /// assert_eq!(unknown.percentage(), None);
    /// ```
    pub fn percentage(&self) -> Option<f64> {
        self.total_items.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.items_processed as f64 / total as f64) * 100.0
            }
        })
    }

    /// Returns whether this phase is complete.
    pub fn is_complete(&self) -> bool {
        self.total_items
            .map(|total| self.items_processed >= total)
            .unwrap_or(false)
    }
}

/// Callback type for receiving progress updates.
///
/// Thread-safe so CLI front ends can share it with timing threads, though
/// the build itself is single-threaded.
pub type ProgressCallback = Arc<dyn Fn(Progress) + Send + Sync>;

/// Creates a no-op progress callback.
///
/// Useful when an API requires a callback but no reporting is wanted.
pub fn no_progress() -> ProgressCallback {
    Arc::new(|_| {})
}

/// Creates a progress callback that prints to stderr.
///
/// # Example
///
/// ```rust
/// use convopack::progress::{stderr_progress, Phase, Progress};
///
/// let callback = stderr_progress();
/// // Prints "Extracting: 50%" to stderr
/// callback(Progress::new(Phase::Extracting, 5, Some(10)));
/// ```
pub fn stderr_progress() -> ProgressCallback {
    Arc::new(|progress| {
        if let Some(pct) = progress.percentage() {
            let phase = match progress.phase {
                Phase::BuildingTree => "Building tree",
                Phase::Extracting => "Extracting",
            };
            eprintln!("{}: {:.0}%", phase, pct);
        }
    })
}
