use crate::state::AppState;
use axum::Router;

pub mod credentials;
mod dto;
pub mod handlers;
pub mod login;

pub fn router() -> Router<AppState> {
    handlers::login_routes()
}
