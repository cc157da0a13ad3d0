//! Collision detection and response
//!
//! Walls run parallel to the goal-to-goal axis; paddles sit in front of the
//! goals. All checks are on integer positions after the ball has moved.

use super::state::{Ball, Court, Paddle};
use crate::settings::{Deflection, Layout};

/// Bounce the ball off the side walls. Returns true on a bounce.
///
/// Horizontal goals: the ball is pushed one unit back inside and its x
/// velocity is forced inward, so a ball resting on the boundary cannot
/// re-trigger. Vertical goals: the y velocity is reflected.
pub fn resolve_wall_collision(ball: &mut Ball, court: &Court) -> bool {
    match court.layout {
        Layout::HorizontalGoals => {
            let right = court.width - ball.radius;
            if ball.pos.x <= 0 {
                ball.pos.x = 1;
                ball.vel.x = ball.vel.x.abs();
                true
            } else if ball.pos.x >= right {
                ball.pos.x = right - 1;
                ball.vel.x = -ball.vel.x.abs();
                true
            } else {
                false
            }
        }
        Layout::VerticalGoals => {
            if ball.pos.y <= 0 || ball.pos.y >= court.height {
                ball.vel.y = -ball.vel.y;
                true
            } else {
                false
            }
        }
    }
}

/// Parallel velocity for a hit at `contact` on a paddle starting at `start`
///
/// Maps the paddle linearly onto `[-speed, speed]`: zero at the center, the
/// full speed at either edge. Truncates toward zero.
pub fn deflection_speed(contact: i32, start: i32, extent: i32, speed: i32) -> i32 {
    let offset = 2 * (i64::from(contact) - i64::from(start)) - i64::from(extent);
    // |offset| <= extent for a contact on the paddle, so this fits back in i32
    (i64::from(speed) * offset / i64::from(extent)) as i32
}

/// Bounce the ball off `paddle` if it is touching it. Returns true on a hit.
///
/// A hit needs the ball's span across the goal axis to overlap the paddle's
/// thickness and the ball's center to lie on the paddle's extent.
pub fn resolve_paddle_collision(
    ball: &mut Ball,
    paddle: &Paddle,
    layout: Layout,
    deflection: Deflection,
    return_speed: i32,
) -> bool {
    let along = layout.parallel(ball.pos);
    let across = layout.perpendicular(ball.pos);

    let touching = across + ball.radius >= paddle.cross
        && across - ball.radius <= paddle.cross + paddle.thickness;
    if !touching || !paddle.spans(along) {
        return false;
    }

    // Force the sign rather than negating, so an overlapping ball that is
    // already leaving is not pulled back in.
    let perpendicular =
        paddle.owner.into_court(layout) * layout.perpendicular(ball.vel).abs();
    let parallel = match deflection {
        Deflection::Angled => deflection_speed(along, paddle.pos, paddle.extent, return_speed),
        Deflection::SignOnly => layout.parallel(ball.vel),
    };
    ball.vel = layout.compose(parallel, perpendicular);
    true
}
