// LogDock - ui/animator.rs
//
// Eased panel movement. The layout engine emits target rectangles; this
// module moves each panel's on-screen rect toward its target over a fixed
// duration with a cubic-bezier ease, or snaps it instantly for immediate
// transitions.
//
// Retargeting: when a new animated command arrives for a panel that is
// already moving, the tween restarts from the panel's current rect toward
// the new target. No jump, no queueing.

use crate::core::geometry::Rect;
use crate::core::host::{LayoutCommand, Transition};
use crate::core::panel::PanelId;
use crate::util::constants::{LAYOUT_ANIM_MS, LAYOUT_EASE_P1, LAYOUT_EASE_P2};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One in-flight panel movement.
#[derive(Debug, Clone, Copy)]
struct Tween {
    from: Rect,
    to: Rect,
    start: Instant,
    duration: Duration,
}

impl Tween {
    /// Eased rect at `now`, and whether the tween has finished.
    fn sample(&self, now: Instant) -> (Rect, bool) {
        if self.duration.is_zero() {
            return (self.to, true);
        }
        let elapsed = now.saturating_duration_since(self.start);
        if elapsed >= self.duration {
            // Snap exactly to the target on completion.
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = ease(t);
        (lerp_rect(self.from, self.to, eased), false)
    }
}

/// Drives all panel tweens. Owned by the eframe::App implementation.
#[derive(Debug, Default)]
pub struct Animator {
    tweens: HashMap<PanelId, Tween>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a layout command. `current` is the panel's on-screen rect at
    /// the time the command arrived.
    pub fn apply(&mut self, command: &LayoutCommand, current: Rect, now: Instant) {
        let duration = match command.transition {
            Transition::Animated => Duration::from_millis(LAYOUT_ANIM_MS),
            Transition::Immediate => Duration::ZERO,
        };
        self.tweens.insert(
            command.panel,
            Tween {
                from: current,
                to: command.target,
                start: now,
                duration,
            },
        );
    }

    /// Advance all tweens to `now`, returning each panel's rect for this
    /// frame. Finished tweens emit their exact target once and are removed.
    pub fn tick(&mut self, now: Instant) -> Vec<(PanelId, Rect)> {
        let mut frames = Vec::with_capacity(self.tweens.len());
        self.tweens.retain(|&id, tween| {
            let (rect, done) = tween.sample(now);
            frames.push((id, rect));
            !done
        });
        frames
    }

    /// Drop any in-flight tween for a removed panel.
    pub fn remove(&mut self, id: PanelId) {
        self.tweens.remove(&id);
    }

    /// True while any tween is in flight (the UI keeps repainting).
    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }
}

// =============================================================================
// Easing
// =============================================================================

/// Cubic-bezier ease through (0,0), P1, P2, (1,1), evaluated by solving the
/// x-polynomial for the curve parameter then sampling y.
fn ease(t: f64) -> f64 {
    let s = solve_bezier_x(t.clamp(0.0, 1.0));
    bezier(s, LAYOUT_EASE_P1.1, LAYOUT_EASE_P2.1)
}

/// One-dimensional cubic bezier with endpoints 0 and 1.
fn bezier(s: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * c1 + 3.0 * inv * s * s * c2 + s * s * s
}

fn bezier_dx(s: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * c1 + 6.0 * inv * s * (c2 - c1) + 3.0 * s * s * (1.0 - c2)
}

/// Find the curve parameter `s` such that `bezier_x(s) == x`.
///
/// Newton-Raphson converges in a handful of iterations for well-behaved
/// control points; a bisection fallback guarantees a bounded answer when
/// the derivative vanishes.
fn solve_bezier_x(x: f64) -> f64 {
    const NEWTON_ITERATIONS: usize = 8;
    const EPSILON: f64 = 1e-6;
    let (c1, c2) = (LAYOUT_EASE_P1.0, LAYOUT_EASE_P2.0);

    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let err = bezier(s, c1, c2) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let d = bezier_dx(s, c1, c2);
        if d.abs() < 1e-9 {
            break;
        }
        s = (s - err / d).clamp(0.0, 1.0);
    }

    // Bisection fallback: bezier_x is monotonic in [0, 1].
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..32 {
        s = (lo + hi) / 2.0;
        if bezier(s, c1, c2) < x {
            lo = s;
        } else {
            hi = s;
        }
    }
    s
}

fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    Rect::new(
        from.x + (to.x - from.x) * t,
        from.y + (to.y - from.y) * t,
        from.width + (to.width - from.width) * t,
        from.height + (to.height - from.height) * t,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(id: u64, target: Rect, transition: Transition) -> LayoutCommand {
        LayoutCommand {
            panel: PanelId(id),
            target,
            transition,
        }
    }

    #[test]
    fn test_ease_endpoints() {
        assert!(ease(0.0).abs() < 1e-4);
        assert!((ease(1.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ease_is_monotonic() {
        let mut prev = ease(0.0);
        for i in 1..=100 {
            let v = ease(i as f64 / 100.0);
            assert!(v >= prev - 1e-6, "ease regressed at step {i}");
            prev = v;
        }
    }

    #[test]
    fn test_immediate_snaps_on_next_tick() {
        let mut animator = Animator::new();
        let now = Instant::now();
        let target = Rect::new(10.0, 20.0, 100.0, 50.0);
        animator.apply(
            &cmd(0, target, Transition::Immediate),
            Rect::new(0.0, 0.0, 1.0, 1.0),
            now,
        );

        let frames = animator.tick(now);
        assert_eq!(frames, vec![(PanelId(0), target)]);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_animated_tween_progresses_and_completes() {
        let mut animator = Animator::new();
        let start = Instant::now();
        let from = Rect::new(0.0, 0.0, 100.0, 100.0);
        let target = Rect::new(200.0, 0.0, 100.0, 100.0);
        animator.apply(&cmd(0, target, Transition::Animated), from, start);

        // Midway: strictly between the endpoints.
        let mid = animator.tick(start + Duration::from_millis(LAYOUT_ANIM_MS / 2));
        let rect = mid[0].1;
        assert!(rect.x > from.x && rect.x < target.x, "mid x = {}", rect.x);
        assert!(animator.is_animating());

        // Past the duration: exact target, tween removed.
        let done = animator.tick(start + Duration::from_millis(LAYOUT_ANIM_MS + 50));
        assert_eq!(done, vec![(PanelId(0), target)]);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_retarget_restarts_from_current_rect() {
        let mut animator = Animator::new();
        let start = Instant::now();
        let from = Rect::new(0.0, 0.0, 100.0, 100.0);
        let first = Rect::new(400.0, 0.0, 100.0, 100.0);
        animator.apply(&cmd(0, first, Transition::Animated), from, start);

        let mid_time = start + Duration::from_millis(LAYOUT_ANIM_MS / 2);
        let current = animator.tick(mid_time)[0].1;

        // New target arrives mid-flight; tween restarts from `current`.
        let second = Rect::new(0.0, 300.0, 100.0, 100.0);
        animator.apply(&cmd(0, second, Transition::Animated), current, mid_time);

        let immediately = animator.tick(mid_time)[0].1;
        assert!((immediately.x - current.x).abs() < 1e-6);
        assert!((immediately.y - current.y).abs() < 1e-6);

        let done = animator.tick(mid_time + Duration::from_millis(LAYOUT_ANIM_MS + 50));
        assert_eq!(done, vec![(PanelId(0), second)]);
    }
}
