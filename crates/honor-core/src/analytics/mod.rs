// Derived views over the player table: filtering, positional means, color
// normalization, chart inputs and rankings.

pub mod aggregate;
pub mod charts;
pub mod color;
pub mod filter;
pub mod ranking;
