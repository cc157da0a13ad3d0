//! Court, paddles, ball and score

use crate::consts::SCORE_MARGIN;
use crate::platform::Canvas;
use crate::settings::{Controls, Theme};
use crate::sim::{GameState, Side};

/// Top-left text anchors for the Home and Away scores
pub fn score_positions(state: &GameState) -> [(i32, i32); 2] {
    let home = (SCORE_MARGIN, SCORE_MARGIN);
    let away = (state.court.width - 2 * SCORE_MARGIN, SCORE_MARGIN);
    [home, away]
}

/// Draw the current state and present it
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, state: &GameState, theme: &Theme) {
    canvas.set_color(theme.background);
    canvas.clear();

    canvas.set_color(theme.foreground);
    for side in [Side::Home, Side::Away] {
        let (x, y, w, h) = state.paddle(side).rect(state.layout());
        canvas.fill_rect(x, y, w, h);
    }

    let ball = &state.ball;
    canvas.fill_circle(ball.pos.x, ball.pos.y, ball.radius);

    let [(hx, hy), (ax, ay)] = score_positions(state);
    canvas.text(&state.score.home.to_string(), hx, hy, theme.score_scale);
    canvas.text(&state.score.away.to_string(), ax, ay, theme.score_scale);

    canvas.present();
}

/// Prompt shown while waiting for a mode-select press
pub fn draw_mode_select<C: Canvas + ?Sized>(canvas: &mut C, controls: &Controls, theme: &Theme) {
    canvas.set_color(theme.background);
    canvas.clear();

    canvas.set_color(theme.foreground);
    let scale = theme.score_scale;
    canvas.text("PONG", SCORE_MARGIN, SCORE_MARGIN, scale + 1);
    let line = 10 * scale as i32;
    canvas.text(
        &format!("{:?}: 1 PLAYER", controls.select_single),
        SCORE_MARGIN,
        SCORE_MARGIN + 3 * line,
        scale,
    );
    canvas.text(
        &format!("{:?}: 2 PLAYERS", controls.select_two),
        SCORE_MARGIN,
        SCORE_MARGIN + 5 * line,
        scale,
    );

    canvas.present();
}
