pub mod healing_progress;
pub mod healing_step;
