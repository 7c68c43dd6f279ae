use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Raw "new sheet" submission. Every field arrives as text; numbers and the
/// delimited lists are interpreted by `parser` when the sheet is built.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetForm {
    pub name: String,
    pub character_name: String,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub size: String,
    pub gender: String,
    pub eye_color: String,
    pub skin: String,
    pub class: String,
    pub race: String,
    pub level: String,
    pub allignment: String,
    pub background: String,
    pub current_expirience: String,
    pub next_expirience: String,
    pub proficiency: String,
    pub strength: String,
    pub dexterity: String,
    pub constitution: String,
    pub intelligence: String,
    pub wisdom: String,
    pub charisma: String,
    pub saves: String,
    pub proficient_skills: String,
    pub expert_skills: String,
    pub languages: String,
    pub tools: String,
    pub vehicles: String,
    pub weapons: String,
    pub armor: String,
    pub inventory: Option<String>,
    pub ac: String,
    pub initiative: String,
    pub speed: String,
    pub ideals: String,
    pub bonds: String,
    pub flaw: String,
    pub feats: Option<String>,
    pub cp: String,
    pub sp: String,
    pub ep: String,
    pub gp: String,
    pub pp: String,
    pub passive_perception: String,
    pub backstory: String,
    pub allies: Option<String>,
    pub hit_die_name: String,
    pub hit_die_amount: String,
    pub health: String,
    pub spells: Option<String>,
}
