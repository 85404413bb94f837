//! Formfill core: the pure scan → match → fill state machine and the wire
//! types exchanged with the matcher service.
mod effect;
mod matcher;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use matcher::{MatchRequest, MatchResponse, MissingField};
pub use msg::Msg;
pub use state::{AppState, Phase};
pub use update::update;
pub use view_model::RoundTripView;
