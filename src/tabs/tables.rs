//! Static option tables
//!
//! Each table maps an option value, as found in record data, to its display
//! label. Labels pass through the localizer before they reach a filter.

/// Value/label pairs backing one filter group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionTable {
    pub entries: &'static [(&'static str, &'static str)],
    /// Keep table order instead of sorting by label
    pub keep_order: bool,
}

impl OptionTable {
    #[must_use]
    pub const fn sorted(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            entries,
            keep_order: false,
        }
    }

    #[must_use]
    pub const fn ordered(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            entries,
            keep_order: true,
        }
    }

    #[must_use]
    pub fn label(&self, value: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == value)
            .map(|(_, label)| *label)
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.label(value).is_some()
    }
}

pub const RARITIES: OptionTable = OptionTable::ordered(&[
    ("common", "Common"),
    ("uncommon", "Uncommon"),
    ("rare", "Rare"),
    ("unique", "Unique"),
]);

pub const TRADITIONS: OptionTable = OptionTable::sorted(&[
    ("arcane", "Arcane"),
    ("divine", "Divine"),
    ("occult", "Occult"),
    ("primal", "Primal"),
]);

pub const SIZES: OptionTable = OptionTable::ordered(&[
    ("tiny", "Tiny"),
    ("sm", "Small"),
    ("med", "Medium"),
    ("lg", "Large"),
    ("huge", "Huge"),
    ("grg", "Gargantuan"),
]);

pub const SPELL_CATEGORIES: OptionTable = OptionTable::sorted(&[
    ("cantrip", "Cantrip"),
    ("focus", "Focus"),
    ("ritual", "Ritual"),
    ("spell", "Spell"),
]);

pub const SPELL_RANKS: OptionTable = OptionTable::ordered(&[
    ("1", "Rank 1"),
    ("2", "Rank 2"),
    ("3", "Rank 3"),
    ("4", "Rank 4"),
    ("5", "Rank 5"),
    ("6", "Rank 6"),
    ("7", "Rank 7"),
    ("8", "Rank 8"),
    ("9", "Rank 9"),
    ("10", "Rank 10"),
]);

pub const CAST_TIMES: OptionTable = OptionTable::ordered(&[
    ("1", "One Action"),
    ("2", "Two Actions"),
    ("3", "Three Actions"),
    ("reaction", "Reaction"),
    ("free", "Free Action"),
    ("1 minute", "1 Minute"),
    ("10 minutes", "10 Minutes"),
    ("1 hour", "1 Hour"),
    ("1 day", "1 Day"),
]);

pub const ACTION_TYPES: OptionTable = OptionTable::ordered(&[
    ("action", "Action"),
    ("reaction", "Reaction"),
    ("free", "Free Action"),
    ("passive", "Passive"),
]);

pub const ACTION_COSTS: OptionTable = OptionTable::ordered(&[
    ("1", "One Action"),
    ("2", "Two Actions"),
    ("3", "Three Actions"),
    ("reaction", "Reaction"),
    ("free", "Free Action"),
    ("passive", "Passive"),
]);

pub const ACTION_CATEGORIES: OptionTable = OptionTable::sorted(&[
    ("defensive", "Defensive"),
    ("familiar", "Familiar"),
    ("interaction", "Interaction"),
    ("offensive", "Offensive"),
]);

pub const FEAT_CATEGORIES: OptionTable = OptionTable::sorted(&[
    ("ancestry", "Ancestry"),
    ("ancestryfeature", "Ancestry Feature"),
    ("bonus", "Bonus"),
    ("calling", "Calling"),
    ("class", "Class"),
    ("classfeature", "Class Feature"),
    ("curse", "Curse"),
    ("deityboon", "Deity Boon"),
    ("general", "General"),
    ("pfsboon", "Society Boon"),
    ("skill", "Skill"),
]);

pub const ANCESTRIES: OptionTable = OptionTable::sorted(&[
    ("anadi", "Anadi"),
    ("android", "Android"),
    ("automaton", "Automaton"),
    ("azarketi", "Azarketi"),
    ("catfolk", "Catfolk"),
    ("conrasu", "Conrasu"),
    ("dwarf", "Dwarf"),
    ("elf", "Elf"),
    ("fetchling", "Fetchling"),
    ("fleshwarp", "Fleshwarp"),
    ("ghoran", "Ghoran"),
    ("gnoll", "Gnoll"),
    ("gnome", "Gnome"),
    ("goblin", "Goblin"),
    ("goloma", "Goloma"),
    ("grippli", "Grippli"),
    ("halfling", "Halfling"),
    ("hobgoblin", "Hobgoblin"),
    ("human", "Human"),
    ("kitsune", "Kitsune"),
    ("kobold", "Kobold"),
    ("leshy", "Leshy"),
    ("lizardfolk", "Lizardfolk"),
    ("nagaji", "Nagaji"),
    ("orc", "Orc"),
    ("poppet", "Poppet"),
    ("ratfolk", "Ratfolk"),
    ("shisk", "Shisk"),
    ("shoony", "Shoony"),
    ("skeleton", "Skeleton"),
    ("sprite", "Sprite"),
    ("strix", "Strix"),
    ("tengu", "Tengu"),
    ("vanara", "Vanara"),
    ("vishkanya", "Vishkanya"),
]);

pub const CLASSES: OptionTable = OptionTable::sorted(&[
    ("alchemist", "Alchemist"),
    ("animist", "Animist"),
    ("barbarian", "Barbarian"),
    ("bard", "Bard"),
    ("champion", "Champion"),
    ("cleric", "Cleric"),
    ("commander", "Commander"),
    ("druid", "Druid"),
    ("exemplar", "Exemplar"),
    ("fighter", "Fighter"),
    ("guardian", "Guardian"),
    ("gunslinger", "Gunslinger"),
    ("inventor", "Inventor"),
    ("investigator", "Investigator"),
    ("kineticist", "Kineticist"),
    ("magus", "Magus"),
    ("monk", "Monk"),
    ("oracle", "Oracle"),
    ("psychic", "Psychic"),
    ("ranger", "Ranger"),
    ("rogue", "Rogue"),
    ("sorcerer", "Sorcerer"),
    ("summoner", "Summoner"),
    ("swashbuckler", "Swashbuckler"),
    ("thaumaturge", "Thaumaturge"),
    ("witch", "Witch"),
    ("wizard", "Wizard"),
]);

pub const SKILLS: OptionTable = OptionTable::sorted(&[
    ("acrobatics", "Acrobatics"),
    ("arcana", "Arcana"),
    ("athletics", "Athletics"),
    ("crafting", "Crafting"),
    ("deception", "Deception"),
    ("diplomacy", "Diplomacy"),
    ("intimidation", "Intimidation"),
    ("lore", "Lore"),
    ("medicine", "Medicine"),
    ("nature", "Nature"),
    ("occultism", "Occultism"),
    ("performance", "Performance"),
    ("religion", "Religion"),
    ("society", "Society"),
    ("stealth", "Stealth"),
    ("survival", "Survival"),
    ("thievery", "Thievery"),
]);

pub const ITEM_TYPES: OptionTable = OptionTable::sorted(&[
    ("armor", "Armor"),
    ("backpack", "Container"),
    ("consumable", "Consumable"),
    ("equipment", "Equipment"),
    ("kit", "Kit"),
    ("shield", "Shield"),
    ("treasure", "Treasure"),
    ("weapon", "Weapon"),
]);

pub const WEAPON_CATEGORIES: OptionTable = OptionTable::ordered(&[
    ("unarmed", "Unarmed"),
    ("simple", "Simple"),
    ("martial", "Martial"),
    ("advanced", "Advanced"),
]);

pub const WEAPON_GROUPS: OptionTable = OptionTable::sorted(&[
    ("axe", "Axe"),
    ("bomb", "Bomb"),
    ("bow", "Bow"),
    ("brawling", "Brawling"),
    ("club", "Club"),
    ("crossbow", "Crossbow"),
    ("dart", "Dart"),
    ("firearm", "Firearm"),
    ("flail", "Flail"),
    ("hammer", "Hammer"),
    ("knife", "Knife"),
    ("pick", "Pick"),
    ("polearm", "Polearm"),
    ("shield", "Shield"),
    ("sling", "Sling"),
    ("spear", "Spear"),
    ("sword", "Sword"),
]);

pub const ARMOR_CATEGORIES: OptionTable = OptionTable::ordered(&[
    ("unarmored", "Unarmored"),
    ("light", "Light"),
    ("medium", "Medium"),
    ("heavy", "Heavy"),
]);

pub const ARMOR_GROUPS: OptionTable = OptionTable::sorted(&[
    ("chain", "Chain"),
    ("cloth", "Cloth"),
    ("composite", "Composite"),
    ("leather", "Leather"),
    ("plate", "Plate"),
    ("skeletal", "Skeletal"),
    ("wood", "Wood"),
]);

pub const HAZARD_COMPLEXITY: OptionTable = OptionTable::sorted(&[
    ("complex", "Complex"),
    ("simple", "Simple"),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        assert_eq!(SIZES.label("grg"), Some("Gargantuan"));
        assert!(!CLASSES.contains("dwarf"));
        assert!(ANCESTRIES.contains("dwarf"));
    }

    #[test]
    fn test_trait_maps_are_disjoint() {
        for (value, _) in ANCESTRIES.entries {
            assert!(!CLASSES.contains(value), "{value} is both ancestry and class");
            assert!(!SKILLS.contains(value), "{value} is both ancestry and skill");
        }
    }
}
