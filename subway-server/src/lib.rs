//! NYC subway arrivals server.
//!
//! A web application that answers: "which trains are about to reach
//! my platform, and where is this particular train headed?"

pub mod board;
pub mod cache;
pub mod domain;
pub mod feed;
pub mod stations;
pub mod web;
