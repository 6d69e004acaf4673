//! Frame similarity analysis.
//!
//! Core strategy:
//! 1. Pixel difference metric - normalized mean Euclidean RGB distance
//! 2. Threshold classification - scene change vs movement vs near-duplicate
//! 3. Coarse-grid scene scan - candidate timestamps from detected changes
//! 4. Duplicate filtering - drop frames too close to the last retained one

pub mod classifier;
pub mod dedup;
pub mod detector;
pub mod difference;

pub use classifier::{
    has_movement, is_scene_change, is_similar, movement_threshold, DEFAULT_SCENE_THRESHOLD,
    DEFAULT_SIMILARITY_THRESHOLD,
};
pub use dedup::{filter_duplicates, DuplicateFilter, TimedFrame};
pub use detector::{DetectorState, SceneDetector, DEFAULT_GRID_STEP, DEFAULT_MIN_INTERVAL};
pub use difference::frame_difference;
