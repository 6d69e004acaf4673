//! Capture timestamp planning.

/// Fixed-interval timestamps: `start, start + interval, …` strictly below
/// `end`. Short ranges still yield one capture at `start` rather than
/// nothing.
pub fn sample_timestamps(start: f64, end: f64, interval: f64) -> Vec<f64> {
    let mut timestamps = Vec::new();
    let mut time = start;
    while time < end {
        timestamps.push(time);
        time += interval;
    }

    if timestamps.is_empty() {
        timestamps.push(start);
    }
    timestamps
}

/// Restricts a candidate sequence to `[start, end]`, falling back to
/// `[start]` when the window empties it.
pub fn window_timestamps(timestamps: Vec<f64>, start: f64, end: f64) -> Vec<f64> {
    let mut windowed: Vec<f64> = timestamps
        .into_iter()
        .filter(|&t| t >= start && t <= end)
        .collect();

    if windowed.is_empty() {
        windowed.push(start);
    }
    windowed
}
