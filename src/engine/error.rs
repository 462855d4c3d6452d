//! Rule violations.
//!
//! Every violation is a non-fatal no-op: the engine rejects the action,
//! reports why, and the game state is untouched. Nothing here tears a
//! match down.

use thiserror::Error;

use crate::board::LocationId;
use crate::core::Side;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("it is not {0}'s turn to act")]
    NotYourTurn(Side),

    #[error("the match is already decided")]
    MatchOver,

    #[error("{0} already drew a card this phase")]
    AlreadyDrew(Side),

    #[error("{0} already moved a unit this phase")]
    AlreadyMoved(Side),

    #[error("unknown card id: {0}")]
    UnknownCard(String),

    #[error("card {0} is not in the deck")]
    CardNotInDeck(String),

    #[error("card {0} is not in hand")]
    CardNotInHand(String),

    #[error("{location} is blocked for {side}")]
    LocationBlocked { side: Side, location: LocationId },

    #[error("{from} and {to} are not adjacent")]
    NotAdjacent { from: LocationId, to: LocationId },

    #[error("no unit at index {0}")]
    InvalidUnitIndex(usize),

    #[error("a unit cannot move on the turn it was placed")]
    UnitJustPlaced,

    #[error("that unit already moved this turn")]
    UnitAlreadyMoved,

    #[error("no combat is awaiting blocker assignments")]
    NotResolving,

    #[error("blocker assignments belong to {0} for this zone")]
    NotBlockerSide(Side),

    #[error("attacker index {0} is out of range")]
    InvalidAttackerIndex(usize),

    #[error("blocker index {0} is out of range")]
    InvalidBlockerIndex(usize),

    #[error("a Taunt unit must be the primary blocker")]
    TauntMustBlock,
}
