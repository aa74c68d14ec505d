pub mod api;
pub mod components;
pub mod config;
pub mod connections;
pub mod form;
pub mod interop;
pub mod mismatch;
pub mod pages;
pub mod poll;
pub mod routes;
pub mod table;
pub mod view_model;

pub use api::{ApiError, HttpMoltApi, MoltApi};
pub use config::{config, ConsoleConfig};
pub use form::TaskFormState;
pub use poll::{PollHandle, PollPhase, PollPolicy};
pub use routes::Route;
