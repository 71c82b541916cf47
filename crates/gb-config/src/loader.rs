//! JSON piece-set loading.

use std::io::Read;
use std::path::Path;

use gb_data::VariableStore;

use crate::compile::compile_piece_set;
use crate::error::ConfigError;
use crate::model::PieceSet;
use crate::raw::RawPieceSet;

/// Load and compile a piece-set asset from a JSON file.
///
/// Variables referenced by the asset are interned into `vars`.
pub fn load_piece_set(path: &Path, vars: &mut VariableStore) -> Result<PieceSet, ConfigError> {
    let file = std::fs::File::open(path).map_err(ConfigError::Io)?;
    load_piece_set_reader(file, vars)
}

/// Like [`load_piece_set`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from embedded
/// assets.
pub fn load_piece_set_reader<R: Read>(
    reader: R,
    vars:   &mut VariableStore,
) -> Result<PieceSet, ConfigError> {
    let raw: RawPieceSet =
        serde_json::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))?;
    compile_piece_set(raw, vars)
}

/// Like [`load_piece_set`] but parses an in-memory JSON string.
pub fn load_piece_set_str(json: &str, vars: &mut VariableStore) -> Result<PieceSet, ConfigError> {
    let raw: RawPieceSet =
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
    compile_piece_set(raw, vars)
}
