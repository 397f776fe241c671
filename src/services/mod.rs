pub mod game;
pub mod leaderboard;
