//! Rule constants shared by the action subsystem.

// === Economy ===

/// Stars each tribe starts with unless configured otherwise.
pub const INITIAL_STARS: u32 = 5;
/// Stars gained by clearing a forest.
pub const CLEAR_FOREST_STARS: u32 = 1;
pub const BURN_FOREST_COST: u32 = 5;
pub const GROW_FOREST_COST: u32 = 5;
pub const ROAD_COST: u32 = 3;
/// Cost of harvesting fish, fruit, animals or whales.
pub const RESOURCE_GATHER_COST: u32 = 2;
/// Population gained by harvesting fish, fruit or animals.
pub const RESOURCE_POPULATION: u32 = 1;
/// Stars gained by harvesting whales.
pub const WHALES_STARS: u32 = 10;

// === Technology ===

pub const TECH_BASE_COST: u32 = 4;
/// Score for researching a technology, multiplied by its tier.
pub const TECH_POINTS_PER_TIER: u32 = 100;

// === Cities ===

/// Radius of the tile square a new city controls.
pub const CITY_RADIUS: u8 = 1;
/// Score per level reached.
pub const CITY_LEVEL_POINTS: u32 = 50;
pub const WORKSHOP_PRODUCTION: u32 = 1;
pub const RESOURCES_BONUS_STARS: u32 = 5;
pub const POP_GROWTH_BONUS: u32 = 3;
pub const PARK_POINTS: u32 = 250;
/// Reveal radius of the Explorer level-up bonus.
pub const EXPLORER_RADIUS: u32 = 3;
/// Score for capturing a village or city.
pub const CAPTURE_POINTS: u32 = 100;
/// Extra production of a custom house per adjacent port.
pub const CUSTOM_HOUSE_PRODUCTION_PER_PORT: u32 = 2;

// === Combat ===

pub const ATTACK_MODIFIER: f64 = 4.5;
pub const DEFENCE_BONUS: f64 = 1.5;
pub const DEFENCE_IN_WALLS: f64 = 4.0;
pub const VETERAN_KILLS: u32 = 3;
pub const VETERAN_HP_BONUS: u32 = 5;

// === Unit upkeep ===

pub const RECOVER_HP: u32 = 2;
pub const RECOVER_HP_IN_TERRITORY: u32 = 4;
pub const HEAL_OTHERS_HP: u32 = 4;
pub const SHIP_UPGRADE_COST: u32 = 5;
pub const BATTLESHIP_UPGRADE_COST: u32 = 15;

// === Vision ===

pub const UNIT_VISION: u32 = 1;
pub const MOUNTAIN_VISION: u32 = 2;

// === Ruins ===

pub const EXAMINE_STARS: u32 = 10;
pub const EXAMINE_POPULATION: u32 = 3;
pub const EXAMINE_REVEAL_RADIUS: u32 = 3;

// === Monuments ===

pub const MONUMENT_POPULATION: u32 = 3;
pub const MONUMENT_POINTS: u32 = 400;
pub const ALTAR_OF_PEACE_TURNS: u32 = 5;
pub const EMPERORS_TOMB_STARS: u32 = 100;
pub const GATE_OF_POWER_KILLS: u32 = 10;
pub const PARK_OF_FORTUNE_LEVEL: u8 = 5;

// === Game length ===

pub const DEFAULT_MAX_TURNS: u32 = 30;
