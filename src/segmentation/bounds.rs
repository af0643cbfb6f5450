//! Segment boundary scans around the true peak
//!
//! The active point (A) is where the continuous rise into the peak
//! begins; the decay point (C) is where a sustained decline sets in
//! after the peak. Both scans read the discrete gradient of the trace.

/// Find the active point: the start of the continuous rise into the peak
///
/// Walks backward from the peak. The active point is the first index `i`
/// (from the peak down to 1) whose preceding gradient sample is <= 0,
/// i.e. the last sample before the rise was uninterrupted. Falls back to
/// 0 when the whole prefix rises.
pub fn find_active_point(gradient: &[f64], peak: usize) -> usize {
    for i in (1..=peak).rev() {
        if gradient[i - 1] <= 0.0 {
            return i;
        }
    }
    0
}

/// Find the decay point: the onset of a sustained decline after the peak
///
/// Scans forward from the peak for the first window of `decay_duration`
/// consecutive strictly negative gradient samples. Falls back to the
/// peak index when no such window fits before the end of the trace.
pub fn find_decay_point(gradient: &[f64], peak: usize, decay_duration: usize) -> usize {
    let n = gradient.len();
    if n < decay_duration {
        return peak;
    }
    for j in peak..n - decay_duration {
        if gradient[j..j + decay_duration].iter().all(|&d| d < 0.0) {
            return j;
        }
    }
    peak
}
