use bitflags::bitflags;

bitflags! {
    /// Boolean state carried from step to step.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct StepFlags: u32 {
        const PRONE              = 1 << 0;
        const HULL_DOWN          = 1 << 1;
        const CLIMBING           = 1 << 2;
        const BACKWARDS          = 1 << 3;
        const TURNING            = 1 << 4;
        /// The unit ended this step on a paved surface.
        const ON_PAVEMENT        = 1 << 5;
        /// Every hex entered so far was paved.
        const ALL_PAVED          = 1 << 6;
        const STACKING_VIOLATION = 1 << 7;
        /// This step requires a stability or failure check.
        const DANGER             = 1 << 8;
        /// Some earlier step required a check.
        const PAST_DANGER        = 1 << 9;
        /// No points were spent and no hexes entered before this step.
        const FIRST_STEP         = 1 << 10;
        const EVER_UNLOADED      = 1 << 11;
        const RUN_PROHIBITED     = 1 << 12;
        const JUMPING            = 1 << 13;
        const EVADING            = 1 << 14;
        /// The unit stood up and has not moved since.
        const STOOD_UP           = 1 << 15;
        const CONVERTING         = 1 << 16;
        const SEARCHLIGHT        = 1 << 17;
        /// The next lateral shift is free.
        const LATERAL_BONUS      = 1 << 18;
        const BRACED             = 1 << 19;
        const CLOSED             = 1 << 20;
        const SHUTDOWN           = 1 << 21;
        const DUG_IN             = 1 << 22;
        const FORTIFIED          = 1 << 23;
        const ROLLED             = 1 << 24;
        const TAKING_COVER       = 1 << 25;
    }
}

impl StepFlags {
    /// Flags that only ever describe the step that set them.
    pub const TRANSIENT: Self = Self::BACKWARDS
        .union(Self::TURNING)
        .union(Self::DANGER)
        .union(Self::FIRST_STEP);
}
