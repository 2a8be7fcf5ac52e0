pub mod distances;
pub mod score;
pub mod train;
