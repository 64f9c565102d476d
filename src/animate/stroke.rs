use crate::foundation::core::Line;
use crate::weave::spline::Spline;

/// What to draw for one spline at one sub-step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaveStep {
    /// Ribbon stroke from `t` to `t + step`.
    pub head: Line,
    /// Segment of the spline the head starts in, for palette lookup.
    pub segment: usize,
    /// Background-colored stroke placed ahead of the head, cutting a gap into any ribbon
    /// the head is about to cross. Starts at least `shadow_width` away from the head's end.
    pub shadow: Option<Line>,
}

/// Head and lookahead shadow of `spline` at parameter `t`.
///
/// The lookahead cursor walks forward from `t + step` until it is `shadow_width` away from
/// the head's end, without passing the end of the curve. When it runs out of curve first
/// there is no shadow.
pub fn weave_step(spline: &Spline, t: f64, step: f64, shadow_width: f64) -> WeaveStep {
    let (p0, segment) = spline.value_at(t);
    let (p1, _) = spline.value_at(t + step);

    let mut shadow = None;
    let mut t2 = t + step;
    if t2 <= 1.0 {
        let mut p3 = spline.value_at(t2).0;
        while t2 + step < 1.0 && p3.distance(p1) < shadow_width {
            t2 += step;
            p3 = spline.value_at(t2).0;
        }
        if p3.distance(p1) >= shadow_width {
            shadow = Some(Line::new(p3, spline.value_at(t2 + step).0));
        }
    }

    WeaveStep {
        head: Line::new(p0, p1),
        segment,
        shadow,
    }
}

/// Closing stroke drawn once the heads have come full circle.
///
/// Walks back from `t` until `shadow_width` away, at most one full turn, and covers that
/// stretch again so the last shadows do not leave a gap at the seam.
pub fn settle_step(spline: &Spline, t: f64, step: f64, shadow_width: f64) -> WeaveStep {
    let (p0, _) = spline.value_at(t);
    let mut offset = step;
    let (mut p1, mut segment) = spline.value_at(t - offset);
    while p1.distance(p0) < shadow_width && offset < 1.0 {
        offset += step;
        (p1, segment) = spline.value_at(t - offset);
    }
    WeaveStep {
        head: Line::new(p0, p1),
        segment,
        shadow: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/stroke.rs"]
mod tests;
