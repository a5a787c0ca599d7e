use super::{GridMover, dungeon_generator::Dungeon};
use crate::{error::SpawnError, types::Cell};

use rand::Rng;
use tracing::event;

/// Drops the actor on a random floor cell of a random room. A missing actor
/// or an empty room list is logged and handed back to the caller.
pub fn place_actor(
    dungeon: &Dungeon,
    actor: Option<&mut GridMover>,
    rng: &mut impl Rng,
) -> Result<Cell, SpawnError> {
    let Some(actor) = actor else {
        event!(tracing::Level::ERROR, "No actor found to place in the dungeon");
        return Err(SpawnError::MissingActor);
    };

    let spawn = dungeon.pick_spawn_point(rng).inspect_err(|err| {
        event!(tracing::Level::ERROR, "Cannot place actor: {}", err);
    })?;

    actor.set_position(spawn.into());

    event!(tracing::Level::DEBUG, "Spawned actor at {}", spawn);

    Ok(spawn)
}
