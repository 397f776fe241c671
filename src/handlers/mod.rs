pub mod account;
pub mod daily;
pub mod facts;
pub mod leaderboard;
pub mod quiz;
