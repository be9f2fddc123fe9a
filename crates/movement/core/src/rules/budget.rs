//! Tiered movement-point budgets.
//!
//! A step is classified by the cheapest tier whose ceiling covers the points
//! used so far. Tiers are checked in a fixed order:
//!
//! | tier                       | ceiling          |
//! |----------------------------|------------------|
//! | walk                       | walk             |
//! | run                        | run              |
//! | run, one booster           | 2 × walk         |
//! | run, all boosters          | ⌈2.5 × walk⌉     |
//! | sprint                     | 2 × walk         |
//! | sprint, one booster        | ⌈2.5 × walk⌉     |
//! | sprint, all boosters       | 3 × walk         |
//!
//! Sprint tiers only exist with the sprint rule enabled.

use crate::env::{BoosterSet, MoveEnv, UnitSnapshot, UnitStatus, run_from_walk};
use crate::step::{StepFlags, StepState};

/// Broad pace of a tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pace {
    Walk,
    Run,
    Sprint,
}

/// The tier a step's cumulative points fall into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierMatch {
    pub pace: Pace,
    /// Boosters the tier needs engaged.
    pub boosters: BoosterSet,
    /// Points exceed what the same tier allows at standard gravity.
    pub beyond_nominal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tier {
    pace: Pace,
    ceiling: u32,
    boosters: BoosterSet,
    nominal: u32,
}

/// Point ceilings available to a unit for one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveBudget {
    pub walk: u32,
    pub run: u32,
    pub jump: u32,
    /// Jump ceiling at standard gravity.
    pub nominal_jump: u32,
    pub safe_thrust: u32,
    pub max_thrust: u32,
    tiers: Vec<Tier>,
}

impl MoveBudget {
    /// Budget for a ground, VTOL or submarine unit, given the path state so far.
    pub fn for_state(env: &MoveEnv<'_>, state: &StepState) -> Self {
        let unit = env.unit();
        let conditions = env.conditions();
        let paved_bonus =
            unit.benefits_from_pavement() && state.flags.contains(StepFlags::ALL_PAVED);

        let mut walk = conditions.scale_by_gravity(unit.walk_mp);
        let mut run = conditions.scale_by_gravity(unit.run_mp);
        if paved_bonus {
            walk += 1;
            run = run.max(run_from_walk(walk));
        }

        let nominal_walk = unit.walk_mp;
        let nominal_run = unit.run_mp;

        let mut tiers = vec![
            Tier {
                pace: Pace::Walk,
                ceiling: walk,
                boosters: BoosterSet::empty(),
                nominal: nominal_walk,
            },
            Tier {
                pace: Pace::Run,
                ceiling: run,
                boosters: BoosterSet::empty(),
                nominal: nominal_run,
            },
        ];

        let single = single_booster(unit.boosters, state.boosters);
        if !single.is_empty() {
            tiers.push(Tier {
                pace: Pace::Run,
                ceiling: walk * 2,
                boosters: single,
                nominal: nominal_walk * 2,
            });
        }
        let all_boosters = unit.boosters.bits().count_ones() > 1;
        if all_boosters {
            tiers.push(Tier {
                pace: Pace::Run,
                ceiling: two_and_a_half(walk),
                boosters: unit.boosters,
                nominal: two_and_a_half(nominal_walk),
            });
        }

        if env.rules().sprint && can_sprint(unit) {
            tiers.push(Tier {
                pace: Pace::Sprint,
                ceiling: walk * 2,
                boosters: BoosterSet::empty(),
                nominal: nominal_walk * 2,
            });
            if !single.is_empty() {
                tiers.push(Tier {
                    pace: Pace::Sprint,
                    ceiling: two_and_a_half(walk),
                    boosters: single,
                    nominal: two_and_a_half(nominal_walk),
                });
            }
            if all_boosters {
                tiers.push(Tier {
                    pace: Pace::Sprint,
                    ceiling: walk * 3,
                    boosters: unit.boosters,
                    nominal: nominal_walk * 3,
                });
            }
        }

        let mut max_thrust = unit.run_mp;
        if unit.status.contains(UnitStatus::THRUSTER_DAMAGED) {
            max_thrust = unit.walk_mp;
        }

        Self {
            walk,
            run,
            jump: conditions.scale_by_gravity(unit.jump_mp),
            nominal_jump: unit.jump_mp,
            safe_thrust: unit.walk_mp,
            max_thrust,
            tiers,
        }
    }

    /// Cheapest tier covering `mp_used`, or `None` when over every ceiling.
    ///
    /// A tier whose ceiling is no higher than an earlier one never matches.
    pub fn classify(&self, mp_used: u32, low_gravity: bool) -> Option<TierMatch> {
        self.tiers
            .iter()
            .find(|tier| mp_used <= tier.ceiling)
            .map(|tier| TierMatch {
                pace: tier.pace,
                boosters: tier.boosters,
                beyond_nominal: low_gravity && mp_used > tier.nominal,
            })
    }
}

/// Booster used for single-booster tiers: an already engaged one, else the first fitted.
fn single_booster(fitted: BoosterSet, engaged: BoosterSet) -> BoosterSet {
    let preferred = fitted & engaged;
    let pool = if preferred.is_empty() {
        fitted
    } else {
        preferred
    };
    pool.iter().next().unwrap_or(BoosterSet::empty())
}

fn can_sprint(unit: &UnitSnapshot) -> bool {
    !unit.is_infantry_like()
        && !unit.is_aero()
        && !unit.is_submarine()
        && !unit.status.contains(UnitStatus::LEG_DAMAGED)
}

const fn two_and_a_half(walk: u32) -> u32 {
    (walk * 5).div_ceil(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BoardId, EntityId};
    use crate::config::RulesConfig;
    use crate::env::{BoardDimensions, Conditions, MapBoard, MovementMode, UnitClass};

    fn mek(walk: u32) -> UnitSnapshot {
        UnitSnapshot::new(EntityId(1), UnitClass::Mek, MovementMode::Biped).with_walk(walk)
    }

    fn budget(unit: &UnitSnapshot, conditions: &Conditions, rules: &RulesConfig) -> MoveBudget {
        let board = MapBoard::new(BoardId(0), BoardDimensions::new(3, 3));
        let env = MoveEnv::new(&board, unit, conditions, rules);
        MoveBudget::for_state(&env, &StepState::origin(&env))
    }

    #[test]
    fn plain_unit_has_walk_and_run() {
        let unit = mek(4);
        let b = budget(&unit, &Conditions::new(), &RulesConfig::new());
        assert_eq!(b.classify(4, false).map(|t| t.pace), Some(Pace::Walk));
        assert_eq!(b.classify(6, false).map(|t| t.pace), Some(Pace::Run));
        assert_eq!(b.classify(7, false), None);
    }

    #[test]
    fn boosters_extend_running() {
        let unit = mek(4).with_boosters(BoosterSet::MASC | BoosterSet::SUPERCHARGER);
        let b = budget(&unit, &Conditions::new(), &RulesConfig::new());

        let one = b.classify(8, false);
        assert_eq!(one.map(|t| t.pace), Some(Pace::Run));
        assert_eq!(one.map(|t| t.boosters), Some(BoosterSet::MASC));

        let both = b.classify(10, false);
        assert_eq!(both.map(|t| t.boosters), Some(BoosterSet::MASC | BoosterSet::SUPERCHARGER));
        assert_eq!(b.classify(11, false), None);
    }

    #[test]
    fn sprint_tiers_require_the_rule() {
        let unit = mek(4).with_boosters(BoosterSet::MASC | BoosterSet::SUPERCHARGER);
        let b = budget(&unit, &Conditions::new(), &RulesConfig::advanced());
        assert_eq!(b.classify(13, false), None);
        assert_eq!(b.classify(12, false).map(|t| t.pace), Some(Pace::Sprint));
    }

    #[test]
    fn low_gravity_grows_budget_and_flags_overrun() {
        let unit = mek(4);
        let conditions = Conditions {
            gravity_centi: 50,
            ..Conditions::new()
        };
        let b = budget(&unit, &conditions, &RulesConfig::new());
        assert_eq!(b.walk, 8);

        let tier = b.classify(6, true);
        assert_eq!(tier.map(|t| t.pace), Some(Pace::Walk));
        assert_eq!(tier.map(|t| t.beyond_nominal), Some(true));
    }
}
