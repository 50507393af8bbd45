//! Curated title taxonomy layered over the organically discovered graph.
//!
//! The salvaged snapshots predate consistent category tagging, so a fixed
//! ordered rule list maps whole-word title tokens to target categories.
//! Every rule is evaluated for every title — a title matching several
//! rules lands in several categories.

use regex::Regex;
use std::sync::LazyLock;

/// One curated rule: a word-boundary pattern and the category it feeds.
pub struct Rule {
    pattern: Regex,
    pub category: &'static str,
}

/// Rule table, in declaration order. Wording follows the original wiki's
/// own section names.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    [
        (
            r"(?i)\b(Armor|Armors|Cloth|Leather|Plate|Shield|Shields|Jewelry|Equipment Set)s?\b",
            "Equipment",
        ),
        (
            r"(?i)\b(Claws|Crossbows|Dual Swords|Knuckles|Launcher|Staves|Two Handed|One Handed|Wands)\b",
            "Weapons",
        ),
        (r"(?i)\b(Quest|Quest:|Quests)\b", "Quests"),
        (r"(?i)\b(Monster|Monsters|MOB|Drop|Mob item drops)\b", "Monsters"),
        (r"(?i)\b(Skill|Skills|DNA)\b", "Skills"),
        (
            r"(?i)\b(Stat|Stats|EXP|EXP Chart|Level|Levels|Leveling|Leveling Spots)\b",
            "Character",
        ),
        (
            r"(?i)\b(World|Map|World Map|Place|Places|Dungeon|Dungeons)\b",
            "World",
        ),
        (r"(?i)\b(Client|Patch|Patches|Downloads?)\b", "Downloads"),
        (
            r"(?i)\b(Xeons|Waters|Consumables?|Potion|Potions|Elixir|Elixirs)\b",
            "Consumables",
        ),
        (r"(?i)\b(Build|Builds|Guide|Guides?)\b", "Guides"),
        (
            r"(?i)\b(Class|Rogue|Warrior|Shaman|Mystic|Templar|Radiant|Assassin|Avenger|Berserker|Commander|Defender|Defiler|Dominator|Druid|Elementalist|Forsaker|Protector|Shadow Runner|Soul Hunter)\b",
            "Classes",
        ),
    ]
    .iter()
    .map(|&(pattern, category)| Rule {
        pattern: Regex::new(pattern).expect("static pattern"),
        category,
    })
    .collect()
});

/// Categories pinned to the "Featured" navigation section, in display
/// order, always rendered even when a snapshot yields no members.
pub const CURATED_ROOTS: &[&str] = &[
    "Equipment",
    "Armors",
    "Jewelry",
    "Shields",
    "Weapons",
    "Classes",
    "Skills",
    "Quests",
    "Monsters",
    "Character",
    "World",
    "Downloads",
    "Consumables",
    "Guides",
];

/// Target categories of every rule matching `title`, in rule order.
pub fn categories_for(title: &str) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| rule.pattern.is_match(title))
        .map(|rule| rule.category)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
