pub mod sequencer;

pub use sequencer::{
    AdvanceOutcome, DraftSequencer, Participant, RetreatOutcome, ValidationError, MAX_SLOTS,
};
