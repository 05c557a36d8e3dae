//! Save/Load functionality for persisting city state
//!
//! Uses bincode for binary serialization of the whole subsystem:
//! robots, zones, the project queue and the aggregate stats. Entity
//! components are serialized individually then respawned on load.

use hecs::World;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::{CityStats, ProjectQueue, Robot, Zone};

/// Version number for the save format (increment when the shape changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the full simulation state
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub tick: u64,
    pub stats: CityStats,
    pub queue: ProjectQueue,
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    pub robot: Option<Robot>,
    pub zone: Option<Zone>,
}

fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();

    for entity in world.iter() {
        let mut se = SerializableEntity::default();
        let entity_ref = world.entity(entity.entity()).unwrap();

        if let Some(c) = entity_ref.get::<&Robot>() {
            se.robot = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&Zone>() {
            se.zone = Some((*c).clone());
        }

        entities.push(se);
    }

    entities
}

fn deserialize_entities(world: &mut World, entities: Vec<SerializableEntity>) {
    for se in entities {
        let entity = world.spawn(());
        if let Some(c) = se.robot {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.zone {
            let _ = world.insert_one(entity, c);
        }
    }
}

/// Save the complete simulation to a writer
pub fn save_city<W: Write>(
    writer: W,
    world: &World,
    tick: u64,
    stats: &CityStats,
    queue: &ProjectQueue,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        tick,
        stats: stats.clone(),
        queue: queue.clone(),
        entities: serialize_entities(world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a simulation from a reader
pub fn load_city<R: Read>(reader: R) -> Result<LoadedCity, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    deserialize_entities(&mut world, save_data.entities);

    Ok(LoadedCity {
        world,
        tick: save_data.tick,
        stats: save_data.stats,
        queue: save_data.queue,
    })
}

/// Result of loading a snapshot
pub struct LoadedCity {
    pub world: World,
    pub tick: u64,
    pub stats: CityStats,
    pub queue: ProjectQueue,
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(f, "Save version mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CityEngine;
    use crate::generation::CityConfig;

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = CityEngine::with_seed(11);
        engine.generate(&CityConfig::default());
        engine.trigger_emergency_construction();
        for _ in 0..10 {
            engine.tick();
        }

        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("save failed");

        let mut restored = CityEngine::with_seed(11);
        restored.load(&buffer[..]).expect("load failed");

        assert_eq!(restored.tick_count(), engine.tick_count());
        assert_eq!(restored.stats(), engine.stats());
        assert_eq!(restored.queue(), engine.queue());
        assert_eq!(restored.robot_count(), engine.robot_count());
        assert_eq!(restored.zone_count(), engine.zone_count());
    }

    #[test]
    fn test_version_mismatch_is_an_error() {
        let mut engine = CityEngine::with_seed(1);
        engine.generate(&CityConfig::default());

        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("save failed");

        let mut save_data: SaveData = bincode::deserialize(&buffer).unwrap();
        save_data.version = 99;
        let tampered = bincode::serialize(&save_data).unwrap();

        match load_city(&tampered[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_garbage_input_is_an_error() {
        let garbage = vec![0xde, 0xad, 0xbe, 0xef];
        assert!(load_city(&garbage[..]).is_err());
    }
}
