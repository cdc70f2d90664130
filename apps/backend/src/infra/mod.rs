//! Infrastructure layer - database, state management, cancellation and error handling.

pub mod cancel;
pub mod db;
pub mod db_errors;
pub mod state;
