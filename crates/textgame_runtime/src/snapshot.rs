//! Game snapshots using `MessagePack`.
//!
//! A snapshot holds the whole [`State`], random source included, so a loaded
//! game continues exactly like the saved one would have. Behaviours are stored
//! as their parameters and rebuilt through the behaviour registry on load.
//! Scheduled events and pending questions hold closures and are not saved.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::info;
use textgame_engine::{BehaviourRegistry, Game, State};
use textgame_foundation::{Error, ErrorKind, Result};

/// Serializes a state to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(state: &State) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(state).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a state from `MessagePack` bytes and rebuilds its behaviours.
///
/// # Errors
///
/// Returns an error if deserialization fails, the player stands in a room
/// that does not exist or a behaviour is not registered.
pub fn from_bytes(bytes: &[u8], behaviours: &BehaviourRegistry) -> Result<State> {
    let mut state: State = rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))?;
    state.check_locations()?;
    state.restore_behaviours(behaviours)?;
    Ok(state)
}

/// Saves a state to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(state: &State, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(state)?;
    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to create file '{}': {e}",
            path.display()
        )))
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to write to file '{}': {e}",
            path.display()
        )))
    })?;
    writer.flush().map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to flush file '{}': {e}",
            path.display()
        )))
    })?;
    Ok(())
}

/// Loads a state from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, deserialization fails or a
/// behaviour is not registered.
pub fn load_from_file<P: AsRef<Path>>(path: P, behaviours: &BehaviourRegistry) -> Result<State> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to open file '{}': {e}",
            path.display()
        )))
    })?;

    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::Io(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;
    from_bytes(&bytes, behaviours)
}

/// Saves the state of a game.
///
/// # Errors
///
/// - [`ErrorKind::PendingQuestion`] while the game waits for an answer
/// - Any error of [`save_to_file`]
pub fn save_game<P: AsRef<Path>>(game: &Game, path: P) -> Result<()> {
    if game.caller().has_pending_question() {
        return Err(Error::new(ErrorKind::PendingQuestion));
    }
    save_to_file(game.state(), path.as_ref())?;
    info!("game saved to {}", path.as_ref().display());
    Ok(())
}

/// Replaces the state of a game with a saved one. Any pending question is
/// dropped.
///
/// # Errors
///
/// Any error of [`load_from_file`]. The game is unchanged on error.
pub fn load_game<P: AsRef<Path>>(game: &mut Game, path: P) -> Result<()> {
    let state = load_from_file(path.as_ref(), &game.registries().behaviours)?;
    game.replace_state(state);
    info!("game loaded from {}", path.as_ref().display());
    Ok(())
}
