// JSON API and HTTP routing

pub mod handlers;
pub mod models;
pub mod routes;
