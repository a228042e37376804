//! Roll extractor
//!
//! Reads the first numeric total out of an event's structured roll
//! attachments. Free text is never parsed, so narrative prose containing
//! numbers cannot produce a false total.

use crate::domain::events::RollData;

pub fn first_total(rolls: &[RollData]) -> Option<i32> {
    rolls.iter().find_map(|roll| roll.total)
}
