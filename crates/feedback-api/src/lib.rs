pub mod error;
pub mod feedback;
pub mod health;
pub mod routes;
pub mod state;
