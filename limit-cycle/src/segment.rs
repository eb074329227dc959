use crate::types::{PhaseView, Trajectory};

/// Trajectory split into a transient prefix and a limit-cycle suffix.
#[derive(Debug, Clone, Copy)]
pub struct Segmentation<'a> {
    /// Effective split index, within `[0, len - 1]` (0 for an empty trajectory).
    pub transient_end: usize,
    /// Points `[0, transient_end)`.
    pub transient: PhaseView<'a>,
    /// Points `[transient_end, len)`.
    pub cycle: PhaseView<'a>,
}

impl Segmentation<'_> {
    /// Total number of points across both views.
    pub fn len(&self) -> usize {
        self.transient.len() + self.cycle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transient.is_empty() && self.cycle.is_empty()
    }
}

/// Clamp a requested split index into `[0, len - 1]`.
///
/// Any signed request is accepted; out-of-range values are clamped, never
/// rejected. An empty trajectory always splits at 0.
pub fn clamp_split(requested: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len as i128 - 1;
    (requested as i128).clamp(0, last) as usize
}

/// Split `trajectory` at `requested`, clamped by [`clamp_split`].
pub fn segment(trajectory: &Trajectory, requested: i64) -> Segmentation<'_> {
    segment_at(trajectory, clamp_split(requested, trajectory.len()))
}

/// Split at an index already known to be in range.
pub(crate) fn segment_at(trajectory: &Trajectory, transient_end: usize) -> Segmentation<'_> {
    let (transient, cycle) = trajectory.view().split_at(transient_end);
    Segmentation {
        transient_end,
        transient,
        cycle,
    }
}
