pub mod legs;
pub mod lobbies;
pub mod matches;
pub mod visits;

pub use legs::Entity as Legs;
pub use legs::Model as Leg;
pub use lobbies::Entity as Lobbies;
pub use lobbies::Model as Lobby;
pub use lobbies::{GameMode, LobbyStatus};
pub use matches::Entity as Matches;
pub use matches::Model as Match;
pub use matches::MatchStatus;
pub use visits::Entity as Visits;
pub use visits::Model as Visit;
