pub mod allocation;
pub mod animals;
pub mod board;
pub mod display;
pub mod h2h;
pub mod matrix;
pub mod totals;

pub use board::{GameView, Scoreboard};
pub use h2h::{H2hMatch, Handicap, MatchResult};
