use crate::models::{Abilities, Coin, HitDice, Sheet, SheetForm};

use super::parse_records;

/// Scalar number field. Anything that is not an integer counts as zero.
pub fn parse_int(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Plain comma list such as languages or saving throws.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Assembles a sheet owned by `owner` from a raw form submission.
pub fn build_sheet(owner: &str, form: SheetForm) -> Sheet {
    Sheet {
        owner: owner.to_string(),
        name: form.name,
        character_name: form.character_name,
        age: parse_int(&form.age),
        weight: form.weight,
        height: form.height,
        size: form.size,
        gender: form.gender,
        eye_color: form.eye_color,
        skin: form.skin,
        class: form.class,
        race: form.race,
        level: parse_int(&form.level),
        allignment: form.allignment,
        background: form.background,
        current_expirience: parse_int(&form.current_expirience),
        next_expirience: parse_int(&form.next_expirience),
        proficiency: parse_int(&form.proficiency),
        scores: Abilities {
            strength: parse_int(&form.strength),
            dexterity: parse_int(&form.dexterity),
            constitution: parse_int(&form.constitution),
            intelligence: parse_int(&form.intelligence),
            wisdom: parse_int(&form.wisdom),
            charisma: parse_int(&form.charisma),
        },
        saves: parse_list(&form.saves),
        proficient_skills: parse_list(&form.proficient_skills),
        expert_skills: parse_list(&form.expert_skills),
        languages: parse_list(&form.languages),
        tools: parse_list(&form.tools),
        vehicles: parse_list(&form.vehicles),
        weapons: parse_list(&form.weapons),
        armor: parse_list(&form.armor),
        inventory: parse_records(form.inventory.as_deref()),
        ac: parse_int(&form.ac),
        initiative: parse_int(&form.initiative),
        speed: parse_int(&form.speed),
        ideals: form.ideals,
        bonds: form.bonds,
        flaw: form.flaw,
        feats: parse_records(form.feats.as_deref()),
        money: Coin {
            cp: parse_int(&form.cp),
            sp: parse_int(&form.sp),
            ep: parse_int(&form.ep),
            gp: parse_int(&form.gp),
            pp: parse_int(&form.pp),
        },
        passive_perception: parse_int(&form.passive_perception),
        backstory: form.backstory,
        allies: parse_records(form.allies.as_deref()),
        hit_die: HitDice {
            name: form.hit_die_name,
            amount: parse_int(&form.hit_die_amount),
        },
        health: parse_int(&form.health),
        spells: parse_records(form.spells.as_deref()),
    }
}
