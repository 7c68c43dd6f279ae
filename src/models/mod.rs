mod user;
mod forms;
mod sheet;

pub use user::Credential;
pub use forms::{LoginForm, RegisterForm, SheetForm};
pub use sheet::{Abilities, Ally, Coin, Feat, HitDice, Item, Sheet, Spell};
