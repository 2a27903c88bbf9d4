pub mod error;
#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::RepoError;
pub use postgres::PgCastStore;
pub use store::{ActorRow, CastStore, MovieRow, NewActor, NewMovie};
