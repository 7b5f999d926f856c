//! Floor stack and player-facing game loop.

use crate::action::{self, ActionError, Interaction, PlayerAction};
use crate::codec::{CorruptSave, MapSnapshot};
use crate::config::GameConfig;
use crate::state::{Entity, EntityId, EntityKind, Map, Position, Tile};

/// Supplies floors below the deepest one built so far.
pub trait FloorGenerator {
    /// Builds floor number `depth`, or `None` when the dungeon ends there.
    fn generate(&mut self, depth: usize) -> Option<Map>;
}

/// Every floor plus the index of the one the player is on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonSnapshot {
    pub floors: Vec<MapSnapshot>,
    pub current_floor: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// The save is valid but its current floor holds no player.
    NoPlayer { message: String },
}

/// What one [`Dungeon::perform`] call did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub ticks: u32,
    pub interaction: Option<Interaction>,
    pub floor_changed: bool,
}

pub struct Dungeon {
    floors: Vec<Map>,
    current: usize,
    player: Option<EntityId>,
    config: GameConfig,
    generator: Option<Box<dyn FloorGenerator>>,
}

impl Dungeon {
    /// Starts on `first`. An existing player on it becomes the controlled one.
    pub fn new(first: Map, config: GameConfig) -> Self {
        let mut dungeon = Self {
            floors: Vec::new(),
            current: 0,
            player: None,
            config,
            generator: None,
        };
        dungeon.push_floor(first);
        dungeon.adopt_player();
        dungeon
    }

    pub fn with_generator(mut self, generator: Box<dyn FloorGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Appends a floor below the deepest one.
    pub fn push_floor(&mut self, mut floor: Map) {
        floor.floor = self.floors.len();
        floor.set_config(self.config.clone());
        self.floors.push(floor);
    }

    /// Places a fresh player on the start cell of the current floor.
    pub fn spawn_player(&mut self) -> Result<EntityId, ActionError> {
        let map = self.map_mut();
        let start = map.start();
        let id = map.add_entity(EntityKind::Player.spawn(start));
        map.move_entity(id, start)?;
        self.player = Some(id);
        Ok(id)
    }

    fn adopt_player(&mut self) {
        self.player = self.map().player();
        if let Some(id) = self.player {
            let map = self.map_mut();
            if let Some(position) = map.get(id).map(|entity| entity.position) {
                let _ = map.move_entity(id, position);
            }
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn floors(&self) -> &[Map] {
        &self.floors
    }

    pub fn current_floor(&self) -> usize {
        self.current
    }

    pub fn map(&self) -> &Map {
        &self.floors[self.current]
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.floors[self.current]
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|id| self.map().get(id))
    }

    /// Health of the player, 0 when there is none.
    pub fn player_health(&self) -> i32 {
        self.player()
            .and_then(|entity| entity.fighter.as_ref())
            .map_or(0, |fighter| fighter.health)
    }

    fn require_player(&self) -> Result<EntityId, ActionError> {
        self.player
            .filter(|id| self.map().contains(*id))
            .ok_or(ActionError::NoPlayer)
    }

    /// Applies one player action and runs the ticks it costs.
    pub fn perform(&mut self, action: PlayerAction) -> Result<TurnReport, ActionError> {
        let player = self.require_player()?;
        let mut report = TurnReport::default();
        if action == PlayerAction::ClimbLadder {
            report.floor_changed = self.climb_ladder()?;
            return Ok(report);
        }

        let map = self.map_mut();
        let spent = match action {
            PlayerAction::Move(direction) => action::move_player(map, player, direction)?,
            PlayerAction::Wait => true,
            PlayerAction::Dance => {
                action::dance(map, player)?;
                true
            }
            PlayerAction::Launch(direction) => action::launch(map, player, direction)?,
            PlayerAction::Interact(direction) => {
                report.interaction = action::interact(map, player, direction)?;
                false
            }
            PlayerAction::UseItem(index) => {
                action::use_item(map, player, index)?;
                false
            }
            PlayerAction::EquipItem(index) => {
                action::equip(map, player, index)?;
                false
            }
            PlayerAction::DropItem(index) => {
                action::drop_item(map, player, index)?;
                false
            }
            PlayerAction::ClimbLadder => false,
        };

        if spent {
            map.tick(player);
            report.ticks = 1;
        }
        Ok(report)
    }

    /// Takes the ladder under the player.
    ///
    /// Off the start cell the ladder leads down and lands on the lower
    /// floor's other ladder; on the start cell it leads up and lands on the
    /// upper floor's start. Returns whether the floor changed.
    pub fn climb_ladder(&mut self) -> Result<bool, ActionError> {
        let player = self.require_player()?;
        let map = self.map();
        let here = map.require(player)?.position;
        if !map.tile(here).is_some_and(Tile::is_ladder) {
            return Ok(false);
        }
        let descending = here != map.start();
        let target = if descending {
            self.current + 1
        } else {
            match self.current.checked_sub(1) {
                Some(target) => target,
                None => return Ok(false),
            }
        };

        if target >= self.floors.len() {
            let Some(floor) = self.generator.as_mut().and_then(|g| g.generate(target)) else {
                return Ok(false);
            };
            self.push_floor(floor);
        }

        let Some(mut entity) = self.floors[self.current].remove_entity(player) else {
            return Ok(false);
        };
        let mut carried = std::mem::take(&mut self.floors[self.current].logs);
        let destination = &mut self.floors[target];
        let landing = if descending {
            lower_landing(destination)
        } else {
            destination.start()
        };
        entity.position = landing;
        destination.logs.append(&mut carried);
        let id = destination.add_entity(entity);
        destination.move_entity(id, landing)?;
        destination.logs.add_message(if descending {
            format!("You descend to floor {}.", target + 1)
        } else {
            format!("You climb up to floor {}.", target + 1)
        });

        self.current = target;
        self.player = Some(id);
        tracing::info!(target: "dungeon::engine", floor = target, descending, "floor changed");
        Ok(true)
    }

    pub fn save_state(&self) -> DungeonSnapshot {
        DungeonSnapshot {
            floors: self.floors.iter().map(Map::save_state).collect(),
            current_floor: self.current,
        }
    }

    /// Replaces every floor with the snapshot's. Nothing changes on error.
    pub fn load_state(&mut self, snapshot: &DungeonSnapshot) -> Result<LoadOutcome, CorruptSave> {
        if snapshot.current_floor >= snapshot.floors.len() {
            return Err(CorruptSave::Malformed {
                detail: format!(
                    "current floor {} but only {} floors",
                    snapshot.current_floor,
                    snapshot.floors.len()
                ),
            });
        }
        let floors = snapshot
            .floors
            .iter()
            .map(|floor| floor.restore_with(self.config.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        self.floors = floors;
        self.current = snapshot.current_floor;
        self.player = self.map().player();
        tracing::debug!(
            target: "dungeon::engine",
            floors = self.floors.len(),
            current = self.current,
            "dungeon loaded"
        );

        if self.player.is_some() {
            return Ok(LoadOutcome::Loaded);
        }
        let message = "No player was found on this map! Maybe you died?".to_string();
        self.map_mut().logs.add_message(message.clone());
        Ok(LoadOutcome::NoPlayer { message })
    }
}

/// Ladder cell other than the start, scanning row-major; the start otherwise.
fn lower_landing(map: &Map) -> Position {
    let start = map.start();
    map.tiles()
        .iter()
        .find(|(position, tile)| tile.is_ladder() && *position != start)
        .map_or(start, |(position, _)| position)
}
