use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Abilities {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Coin {
    pub cp: i32,
    pub sp: i32,
    pub ep: i32,
    pub gp: i32,
    pub pp: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub amount: i32,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Feat {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ally {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct HitDice {
    pub name: String,
    pub amount: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Spell {
    pub name: String,
    pub level: i32,
    pub description: String,
}

/// A character sheet document, unique per `(owner, name)`.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Sheet {
    pub owner: String,
    pub name: String,
    pub character_name: String,
    pub age: i32,
    pub weight: String,
    pub height: String,
    pub size: String,
    pub gender: String,
    pub eye_color: String,
    pub skin: String,
    pub class: String,
    pub race: String,
    pub level: i32,
    pub allignment: String,
    pub background: String,
    pub current_expirience: i32,
    pub next_expirience: i32,
    pub proficiency: i32,
    pub scores: Abilities,
    pub saves: Vec<String>,
    pub proficient_skills: Vec<String>,
    pub expert_skills: Vec<String>,
    pub languages: Vec<String>,
    pub tools: Vec<String>,
    pub vehicles: Vec<String>,
    pub weapons: Vec<String>,
    pub armor: Vec<String>,
    pub inventory: Vec<Item>,
    pub ac: i32,
    pub initiative: i32,
    pub speed: i32,
    pub ideals: String,
    pub bonds: String,
    pub flaw: String,
    pub feats: Vec<Feat>,
    pub money: Coin,
    pub passive_perception: i32,
    pub backstory: String,
    pub allies: Vec<Ally>,
    pub hit_die: HitDice,
    pub health: i32,
    pub spells: Vec<Spell>,
}
