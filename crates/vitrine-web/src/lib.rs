//! A small HTTP server that renders a templated homepage and serves a
//! directory of static assets.

mod route;
mod template;

pub mod server;

pub use server::Server;

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
