pub mod feedback;
pub mod render;

pub use feedback::{Feedback, Flash};
pub use render::{cell_at, draw_game, layout, Areas};
