use crate::errors::{ReferenceDataError, ReferenceResult};
use schema::{MoveData, MoveId, SpeciesData, SpeciesId, TypeData, TypeId};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const TYPES_FILE: &str = "types.ron";
pub const MOVES_FILE: &str = "moves.ron";
pub const SPECIES_FILE: &str = "species.ron";

/// Immutable type/move/species tables, keyed by id and by name.
///
/// Built once per process and shared behind an `Arc`; nothing mutates it
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    types: HashMap<TypeId, TypeData>,
    type_names: HashMap<String, TypeId>,
    moves: HashMap<MoveId, MoveData>,
    move_names: HashMap<String, MoveId>,
    species: HashMap<SpeciesId, SpeciesData>,
    species_names: HashMap<String, SpeciesId>,
}

impl ReferenceData {
    /// Load `types.ron`, `moves.ron` and `species.ron` from a directory.
    pub fn load_from_dir(data_path: &Path) -> ReferenceResult<Self> {
        let types = read_table(&data_path.join(TYPES_FILE))?;
        let moves = read_table(&data_path.join(MOVES_FILE))?;
        let species = read_table(&data_path.join(SPECIES_FILE))?;
        let reference = Self::from_tables(types, moves, species);
        log::info!(
            "Loaded reference data from {}: {} types, {} moves, {} species",
            data_path.display(),
            reference.types.len(),
            reference.moves.len(),
            reference.species.len()
        );
        Ok(reference)
    }

    pub fn from_ron_strs(types: &str, moves: &str, species: &str) -> ReferenceResult<Self> {
        Ok(Self::from_tables(
            parse_table(types, TYPES_FILE)?,
            parse_table(moves, MOVES_FILE)?,
            parse_table(species, SPECIES_FILE)?,
        ))
    }

    pub fn from_tables(
        types: Vec<TypeData>,
        moves: Vec<MoveData>,
        species: Vec<SpeciesData>,
    ) -> Self {
        let mut reference = Self::default();
        for type_data in types {
            reference.type_names.insert(type_data.name.clone(), type_data.id);
            reference.types.insert(type_data.id, type_data);
        }
        for move_data in moves {
            reference.move_names.insert(move_data.name.clone(), move_data.id);
            reference.moves.insert(move_data.id, move_data);
        }
        for species_data in species {
            if species_data.moves.is_empty() {
                log::warn!("Species {} has no learnable moves", species_data.name);
            }
            reference
                .species_names
                .insert(species_data.name.clone(), species_data.id);
            reference.species.insert(species_data.id, species_data);
        }
        reference
    }

    pub fn type_by_id(&self, id: TypeId) -> ReferenceResult<&TypeData> {
        self.types.get(&id).ok_or(ReferenceDataError::TypeNotFound(id))
    }

    pub fn type_by_name(&self, name: &str) -> ReferenceResult<&TypeData> {
        self.type_names
            .get(name)
            .and_then(|id| self.types.get(id))
            .ok_or_else(|| ReferenceDataError::TypeNameNotFound(name.to_string()))
    }

    pub fn move_by_id(&self, id: MoveId) -> ReferenceResult<&MoveData> {
        self.moves.get(&id).ok_or(ReferenceDataError::MoveNotFound(id))
    }

    pub fn move_by_name(&self, name: &str) -> ReferenceResult<&MoveData> {
        self.move_names
            .get(name)
            .and_then(|id| self.moves.get(id))
            .ok_or_else(|| ReferenceDataError::MoveNameNotFound(name.to_string()))
    }

    pub fn species_by_id(&self, id: SpeciesId) -> ReferenceResult<&SpeciesData> {
        self.species
            .get(&id)
            .ok_or(ReferenceDataError::SpeciesNotFound(id))
    }

    pub fn species_by_name(&self, name: &str) -> ReferenceResult<&SpeciesData> {
        self.species_names
            .get(name)
            .and_then(|id| self.species.get(id))
            .ok_or_else(|| ReferenceDataError::SpeciesNameNotFound(name.to_string()))
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> ReferenceResult<Vec<T>> {
    let content = fs::read_to_string(path)
        .map_err(|e| ReferenceDataError::Io(format!("{}: {}", path.display(), e)))?;
    parse_table(&content, &path.display().to_string())
}

fn parse_table<T: DeserializeOwned>(content: &str, source: &str) -> ReferenceResult<Vec<T>> {
    ron::from_str(content).map_err(|e| ReferenceDataError::Parse(format!("{}: {}", source, e)))
}
