//! Request/response payloads exchanged over REST and SSE.

pub mod catalog;
pub mod game;
pub mod health;
pub mod leaderboard;
pub mod sse;
pub mod validation;
