pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum MoveError {
    #[display("no piece is falling")]
    NotPlaying,
    #[display("piece colliding when moving falling piece")]
    Collision(PieceCollisionError),
}
