//! Adapters for the persistence port.

pub mod legs_sea;
pub mod lobbies_sea;
pub mod matches_sea;
pub mod visits_sea;
