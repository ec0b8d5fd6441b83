//! Library crate for the daily top ten trivia game, exposing modules for the
//! server and documentation binaries.

pub mod clock;
pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
