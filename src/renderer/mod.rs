//! Render adapter
//!
//! Full-frame redraw every tick through the platform `Canvas`: no dirty
//! rectangles, no retained state.

pub mod court;

pub use court::{draw_frame, draw_mode_select, score_positions};
