//! Phase-portrait callouts: labelled arrows pointing at regions of the
//! trajectory.

use limit_cycle::Landmarks;

/// One labelled arrow in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub lines: [&'static str; 2],
    /// Top-left anchor of the label; the arrow starts here.
    pub text_at: (f64, f64),
    /// Point the arrow head touches.
    pub target: (f64, f64),
}

/// Callouts for a portrait.
///
/// The two fixed callouts are always present; the three that follow the
/// trajectory need landmarks and are dropped for an empty run.
pub fn annotations(landmarks: Option<&Landmarks>) -> Vec<Annotation> {
    let mut out = vec![
        Annotation {
            lines: ["Δφ=0", "(Timeless Vacuum / Platonia)"],
            text_at: (-2.2, -2.3),
            target: (0.0, 0.0),
        },
        Annotation {
            lines: ["Vacuum Instability", "(Negative Damping)"],
            text_at: (-2.6, 1.8),
            target: (0.4, 0.2),
        },
    ];

    if let Some(marks) = landmarks {
        let point = |s: limit_cycle::OscillatorState| (s.position, s.velocity);
        out.push(Annotation {
            lines: ["Positive Damping Region", "(Stabilization)"],
            text_at: (1.6, 2.2),
            target: point(marks.cycle_early),
        });
        out.push(Annotation {
            lines: ["Time Crystal Phase", "(STTSB / Stable Limit Cycle)"],
            text_at: (1.4, -2.6),
            target: point(marks.cycle_mid),
        });
        out.push(Annotation {
            lines: ["Emergence of", "Arrow of Time"],
            text_at: (-3.0, -0.2),
            target: point(marks.arrow_of_time),
        });
    }

    out
}

/// Polylines for an arrow from `from` to `to`: the shaft, then two head
/// strokes of length `head` opening at ±25° around the shaft.
///
/// A degenerate or non-finite arrow yields just the shaft.
pub fn arrow_paths(from: (f64, f64), to: (f64, f64), head: f64) -> Vec<Vec<(f64, f64)>> {
    let shaft = vec![from, to];
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if !len.is_finite() || len == 0.0 {
        return vec![shaft];
    }

    // unit vector pointing back along the shaft
    let (bx, by) = (-dx / len, -dy / len);
    let (sin, cos) = 25f64.to_radians().sin_cos();
    let wing = |s: f64| {
        let rx = bx * cos - by * s;
        let ry = bx * s + by * cos;
        vec![to, (to.0 + head * rx, to.1 + head * ry)]
    };

    vec![shaft, wing(sin), wing(-sin)]
}
