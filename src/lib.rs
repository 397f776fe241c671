pub mod db;
pub mod extractors;
pub mod fact_api;
pub mod game;
pub mod handlers;
pub mod models;
pub mod names;
pub mod play;
pub mod rejections;
pub mod services;
pub mod trivia_api;
pub mod utils;

use axum::Router;

use fact_api::FactClient;
use play::SessionMap;
use trivia_api::TriviaClient;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub trivia: TriviaClient,
    pub facts: FactClient,
    pub sessions: SessionMap,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(db: db::Db, trivia: TriviaClient, facts: FactClient, secure_cookies: bool) -> Self {
        Self {
            db,
            trivia,
            facts,
            sessions: play::new_session_map(),
            secure_cookies,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::account::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::daily::routes())
        .merge(handlers::leaderboard::routes())
        .merge(handlers::facts::routes())
        .with_state(state)
}
