pub mod auth;
pub mod discord;
pub mod route;
pub mod zoom;
