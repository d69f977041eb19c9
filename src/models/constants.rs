/// Number of edge neighbours of a hex cell.
pub const HEX_DIRECTIONS: usize = 6;

pub const DEFAULT_MAP_COLUMNS: i32 = 12;
pub const DEFAULT_MAP_ROWS: i32 = 8;

pub const DEFAULT_PLAYER_SHIPS: usize = 1;
pub const DEFAULT_ENEMY_SHIPS: usize = 3;
pub const DEFAULT_SPAWN_RETRY_ATTEMPTS: u32 = 10;

pub const DEFAULT_MAX_ACTIONS: u32 = 2;
pub const DEFAULT_MAX_HEALTH: i32 = 100;
pub const DEFAULT_ARMOR: i32 = 5;
pub const DEFAULT_MOVEMENT_RANGE: i32 = 3;
pub const DEFAULT_ATTACK_RANGE: i32 = 3;
pub const DEFAULT_RANGED_DAMAGE: &str = "2D6";
pub const DEFAULT_BOARDING_DAMAGE: &str = "3D6";

/// Largest die count a dice expression may name.
pub const MAX_DICE_COUNT: u32 = 1_000;
/// Largest die size a dice expression may name. With `MAX_DICE_COUNT` this
/// keeps every total inside `i32`.
pub const MAX_DICE_SIDES: u32 = 1_000_000;

/// Dice thrown by the ship that starts a boarding action.
pub const BOARDING_ATTACKER_DICE: u32 = 3;
/// Dice thrown by the ship repelling boarders.
pub const BOARDING_DEFENDER_DICE: u32 = 2;

/// Round number shown when a match starts.
pub const FIRST_ROUND: u32 = 1;

/// Neighbour offsets `(d_col, d_row)` for cells on even rows, indexed by direction.
/// Order: east, south-east, south-west, west, north-west, north-east.
pub const EVEN_ROW_NEIGHBORS: [(i32, i32); HEX_DIRECTIONS] = [
    (1, 0),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Neighbour offsets for cells on odd rows. Odd rows sit half a cell further
/// east, so the diagonal neighbours shift by one column.
pub const ODD_ROW_NEIGHBORS: [(i32, i32); HEX_DIRECTIONS] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (0, 1),
    (1, 1),
];
