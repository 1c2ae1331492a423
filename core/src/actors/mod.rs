//! Players and pets taking part in a fight.
//!
//! Pets reference their owner by id; resolution is always a lookup into the
//! flat player table, never object traversal.

use cardcalc_types::{ActorSummary, Role};
use hashbrown::HashMap;
use serde::Deserialize;

use crate::game_data::role_for_job;


pub type ActorId = i64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Player {
    pub id: ActorId,
    pub name: String,
    /// Job type string as reported by the log service (e.g. "DarkKnight")
    #[serde(rename = "type")]
    pub job: String,
}

impl Player {
    pub fn new(id: ActorId, name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            job: job.into(),
        }
    }

    pub fn role(&self) -> Role {
        role_for_job(&self.job)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pet {
    pub id: ActorId,
    pub name: String,
    #[serde(rename = "petOwner")]
    pub owner: ActorId,
}

impl Pet {
    pub fn new(id: ActorId, name: impl Into<String>, owner: ActorId) -> Self {
        Self {
            id,
            name: name.into(),
            owner,
        }
    }
}

/// Tracked players and the pets whose owner is among them.
#[derive(Debug, Clone, Default)]
pub struct ActorList {
    players: HashMap<ActorId, Player>,
    pets: HashMap<ActorId, Pet>,
    /// Player ids in ascending order, for deterministic iteration
    player_order: Vec<ActorId>,
}

impl ActorList {
    /// Build the actor tables. Pets whose owner is not a tracked player are
    /// dropped from the computation.
    pub fn new(players: Vec<Player>, pets: Vec<Pet>) -> Self {
        let players: HashMap<ActorId, Player> = players.into_iter().map(|p| (p.id, p)).collect();

        let mut kept_pets = HashMap::with_capacity(pets.len());
        for pet in pets {
            if players.contains_key(&pet.owner) {
                kept_pets.insert(pet.id, pet);
            } else {
                tracing::warn!(
                    pet_id = pet.id,
                    pet = %pet.name,
                    owner = pet.owner,
                    "Dropping pet with unknown owner"
                );
            }
        }

        let mut player_order: Vec<ActorId> = players.keys().copied().collect();
        player_order.sort_unstable();

        Self {
            players,
            pets: kept_pets,
            player_order,
        }
    }

    pub fn player(&self, id: ActorId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn pet(&self, id: ActorId) -> Option<&Pet> {
        self.pets.get(&id)
    }

    pub fn is_player(&self, id: ActorId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn is_pet(&self, id: ActorId) -> bool {
        self.pets.contains_key(&id)
    }

    /// Player ids in ascending order
    pub fn player_ids(&self) -> &[ActorId] {
        &self.player_order
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.player_order.iter().filter_map(|id| self.players.get(id))
    }

    pub fn pets(&self) -> impl Iterator<Item = &Pet> {
        self.pets.values()
    }

    /// The player credited with damage from `id`: a player itself, or a pet's owner.
    pub fn owner_of(&self, id: ActorId) -> Option<ActorId> {
        if self.players.contains_key(&id) {
            Some(id)
        } else {
            self.pets.get(&id).map(|pet| pet.owner)
        }
    }

    /// Role used for card effectiveness. Pets use their owner's role.
    pub fn effective_role(&self, id: ActorId) -> Option<Role> {
        self.owner_of(id)
            .and_then(|owner| self.players.get(&owner))
            .map(Player::role)
    }

    pub fn name(&self, id: ActorId) -> &str {
        if let Some(player) = self.players.get(&id) {
            &player.name
        } else if let Some(pet) = self.pets.get(&id) {
            &pet.name
        } else {
            "Unknown"
        }
    }

    pub fn len(&self) -> usize {
        self.players.len() + self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.pets.is_empty()
    }

    /// Actor table for reports: players first, then pets, each by id.
    pub fn summaries(&self) -> Vec<ActorSummary> {
        let mut pets: Vec<&Pet> = self.pets.values().collect();
        pets.sort_unstable_by_key(|p| p.id);

        self.players()
            .map(|p| ActorSummary {
                id: p.id,
                name: p.name.clone(),
                job: p.job.clone(),
                role: p.role(),
                owner: None,
            })
            .chain(pets.into_iter().map(|p| ActorSummary {
                id: p.id,
                name: p.name.clone(),
                job: "Pet".to_string(),
                role: Role::Pet,
                owner: Some(p.owner),
            }))
            .collect()
    }
}
