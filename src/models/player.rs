//! Player and the shared Gender enum.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used by pairs and ranking lookups).
pub type PlayerId = Uuid;

/// Gender of a player, or the gender filter of a tournament.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Mixed,
}

/// A registered player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub last_name: String,
    pub gender: Gender,
    /// National id document number. Unique across players.
    pub dni: String,
    pub phone_number: String,
}

impl Player {
    /// Create a new player with a fresh id. Names are trimmed.
    pub fn new(
        name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        dni: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            last_name: last_name.into().trim().to_string(),
            gender,
            dni: dni.into().trim().to_string(),
            phone_number: phone_number.into(),
        }
    }

    /// "Name LastName", for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.last_name)
    }

    pub fn apply_update(&mut self, update: PlayerUpdate) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(phone) = update.phone_number {
            self.phone_number = phone;
        }
    }
}

/// Fields supplied when registering a player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPlayer {
    pub name: String,
    pub last_name: String,
    pub gender: Gender,
    pub dni: String,
    pub phone_number: String,
}

impl From<NewPlayer> for Player {
    fn from(new: NewPlayer) -> Self {
        Player::new(new.name, new.last_name, new.gender, new.dni, new.phone_number)
    }
}

/// Editable contact fields of a player. `None` leaves a field as is; dni and gender are fixed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerUpdate {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Identity part of a player, embedded in stats and ranking responses.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub last_name: String,
    pub gender: Gender,
}

impl PlayerSummary {
    pub fn from_player(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            last_name: p.last_name.clone(),
            gender: p.gender,
        }
    }
}
