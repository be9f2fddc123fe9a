//! Facing-based aerospace movement tables.

/// Straight hexes an aerospace unit must fly before it may turn.
pub const fn turn_threshold(velocity: u32) -> u32 {
    match velocity {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=7 => 3,
        8..=9 => 4,
        10..=11 => 5,
        _ => 6,
    }
}

/// Thrust a turn costs at the given velocity.
pub const fn turn_cost(velocity: u32) -> u32 {
    match velocity {
        0..=5 => 1,
        6..=7 => 2,
        8..=9 => 3,
        _ => 4,
    }
}

/// Thrust a roll costs; repeat rolls in the same turn cost double.
pub const fn roll_cost(previous_rolls: u32) -> u32 {
    if previous_rolls == 0 { 1 } else { 2 }
}

pub const LOOP_COST: u32 = 4;
pub const LOOP_MIN_VELOCITY: u32 = 4;

/// Thrust to climb one altitude level.
pub const CLIMB_COST: u32 = 2;
