//! Repository functions for the domain layer.

pub mod legs;
pub mod lobbies;
pub mod matches;
pub mod visits;
