//! Trip planner server.
//!
//! A web service that answers: "I want to go from here to there for N
//! days, what should I do each day and how do I get there?"

pub mod config;
pub mod domain;
pub mod maps;
pub mod planner;
pub mod polyline;
pub mod web;
