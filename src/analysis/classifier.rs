//! Threshold predicates over a difference score.

/// Default shot-boundary threshold.
pub const DEFAULT_SCENE_THRESHOLD: f64 = 0.3;

/// Default near-duplicate threshold.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.05;

/// Movement detection runs at half the scene threshold: subtle motion should
/// register even without a hard cut.
pub const MOVEMENT_THRESHOLD_FACTOR: f64 = 0.5;

/// A score above the threshold signals a likely shot boundary.
pub fn is_scene_change(score: f64, scene_threshold: f64) -> bool {
    score > scene_threshold
}

/// A score below the threshold marks the frames as near-duplicates.
pub fn is_similar(score: f64, similarity_threshold: f64) -> bool {
    score < similarity_threshold
}

/// Visible change without necessarily being a shot boundary.
pub fn has_movement(score: f64, movement_threshold: f64) -> bool {
    score > movement_threshold
}

/// The movement threshold derived from a scene threshold.
pub fn movement_threshold(scene_threshold: f64) -> f64 {
    scene_threshold * MOVEMENT_THRESHOLD_FACTOR
}
