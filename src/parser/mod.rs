//! Parsing of the flat, delimited text fields submitted by the sheet form.
//!
//! List fields carry several records in one string: records are separated by
//! `,` and the fields of a record by `:`. A record whose field count differs
//! from the expected arity is dropped without an error, and a numeric field
//! that does not parse is replaced by [`PARSE_FAILED`].

mod fields;

pub use fields::{build_sheet, parse_int, parse_list};

use crate::models::{Ally, Feat, Item, Spell};

/// Value stored in a numeric record field whose text is not an integer.
pub const PARSE_FAILED: i32 = -1;

const RECORD_SEPARATOR: char = ',';
const FIELD_SEPARATOR: char = ':';

/// A record that can be read from one `:`-separated entry.
pub trait DelimitedRecord: Sized {
    /// Exact number of `:`-separated parts an entry must have.
    const ARITY: usize;

    /// Builds the record from exactly `ARITY` parts, in input order.
    fn from_parts(parts: &[&str]) -> Self;
}

/// Parses a `,`-separated list of records, keeping input order.
///
/// Absent or empty input yields an empty list.
pub fn parse_records<T: DelimitedRecord>(raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(RECORD_SEPARATOR)
        .filter_map(|entry| {
            let parts: Vec<&str> = entry.split(FIELD_SEPARATOR).collect();
            if parts.len() == T::ARITY {
                Some(T::from_parts(&parts))
            } else {
                tracing::trace!("Dropping malformed entry {:?} (want {} fields)", entry, T::ARITY);
                None
            }
        })
        .collect()
}

fn parse_or_sentinel(raw: &str) -> i32 {
    raw.parse().unwrap_or(PARSE_FAILED)
}

// amount:name:description
impl DelimitedRecord for Item {
    const ARITY: usize = 3;

    fn from_parts(parts: &[&str]) -> Self {
        Item {
            amount: parse_or_sentinel(parts[0]),
            name: parts[1].to_string(),
            description: parts[2].to_string(),
        }
    }
}

// name:level:description
impl DelimitedRecord for Spell {
    const ARITY: usize = 3;

    fn from_parts(parts: &[&str]) -> Self {
        Spell {
            name: parts[0].to_string(),
            level: parse_or_sentinel(parts[1]),
            description: parts[2].to_string(),
        }
    }
}

impl DelimitedRecord for Feat {
    const ARITY: usize = 2;

    fn from_parts(parts: &[&str]) -> Self {
        Feat {
            name: parts[0].to_string(),
            description: parts[1].to_string(),
        }
    }
}

impl DelimitedRecord for Ally {
    const ARITY: usize = 2;

    fn from_parts(parts: &[&str]) -> Self {
        Ally {
            name: parts[0].to_string(),
            description: parts[1].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_drops_malformed_entries() {
        let items: Vec<Item> = parse_records(Some("2:Sword:Sharp,bad,1:Shield:Round"));
        assert_eq!(
            items,
            vec![
                Item { amount: 2, name: "Sword".into(), description: "Sharp".into() },
                Item { amount: 1, name: "Shield".into(), description: "Round".into() },
            ]
        );
    }

    #[test]
    fn item_amount_that_is_not_a_number_becomes_sentinel() {
        let items: Vec<Item> = parse_records(Some("many:Arrow:Pointy,3.5:Rope:Long"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].amount, PARSE_FAILED);
        assert_eq!(items[0].name, "Arrow");
        assert_eq!(items[1].amount, PARSE_FAILED);
    }

    #[test]
    fn too_many_fields_are_dropped_too() {
        let items: Vec<Item> = parse_records(Some("1:Map:Old:Torn,1:Key:Brass"));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Key");

        let feats: Vec<Feat> = parse_records(Some("Alert:+5 init:extra,Lucky"));
        assert!(feats.is_empty());
    }

    #[test]
    fn two_field_records_are_positional() {
        let feats: Vec<Feat> = parse_records(Some("Alert:Cannot be surprised,Tough:More HP"));
        assert_eq!(feats[0], Feat { name: "Alert".into(), description: "Cannot be surprised".into() });
        assert_eq!(feats[1].name, "Tough");

        let allies: Vec<Ally> = parse_records(Some("Gandalf:Wizard"));
        assert_eq!(allies, vec![Ally { name: "Gandalf".into(), description: "Wizard".into() }]);
    }

    #[test]
    fn spell_level_uses_the_same_sentinel_as_items() {
        let spells: Vec<Spell> = parse_records(Some("Fireball:3:Boom,Light:cantrip:Glow"));
        assert_eq!(spells[0].level, 3);
        assert_eq!(spells[0].description, "Boom");
        assert_eq!(spells[1].level, PARSE_FAILED);
    }

    #[test]
    fn empty_or_absent_input_yields_nothing() {
        assert!(parse_records::<Item>(None).is_empty());
        assert!(parse_records::<Item>(Some("")).is_empty());
        assert!(parse_records::<Feat>(Some(",,")).is_empty());
    }

    #[test]
    fn text_is_kept_verbatim() {
        let feats: Vec<Feat> = parse_records(Some(" Alert : <b>x</b> "));
        assert_eq!(feats[0].name, " Alert ");
        assert_eq!(feats[0].description, " <b>x</b> ");

        // Integers are not trimmed either.
        let items: Vec<Item> = parse_records(Some("2:Sword:Sharp, 1:Shield:Round"));
        assert_eq!(items[1].amount, PARSE_FAILED);
    }
}
