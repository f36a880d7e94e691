// Vote counting over a turn window
//
// Per-frame labels are noisy; the action a player actually takes is the one
// their body showed most often during the window.

use super::assignment::PlayerSlot;
use crate::game::action::ActionLabel;

/// Vote counts for a single player slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    counts: [u32; ActionLabel::COUNT],
}

impl VoteTally {
    /// Count one observation
    pub fn record(&mut self, label: ActionLabel) {
        self.counts[label.index()] += 1;
    }

    /// Votes collected for a label
    pub fn count(&self, label: ActionLabel) -> u32 {
        self.counts[label.index()]
    }

    /// Total votes collected
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// The label with the most votes
    ///
    /// Ties go to the label declared first in `ActionLabel`; an empty tally
    /// resolves to Resting.
    pub fn winner(&self) -> ActionLabel {
        let mut best = ActionLabel::Resting;
        let mut best_count = 0;

        for label in ActionLabel::ALL {
            let count = self.count(label);
            if count > best_count {
                best = label;
                best_count = count;
            }
        }

        best
    }
}

/// Vote tallies for both player slots over one turn window
///
/// Only the scanning loop writes to it; it is read once the window closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionAggregator {
    slots: [VoteTally; 2],
}

impl ActionAggregator {
    /// Create an aggregator with no votes
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classifier output
    pub fn record(&mut self, slot: PlayerSlot, label: ActionLabel) {
        self.slots[slot.index()].record(label);
    }

    /// Votes collected for a slot
    pub fn tally(&self, slot: PlayerSlot) -> &VoteTally {
        &self.slots[slot.index()]
    }

    /// The action a slot takes this turn
    pub fn resolve(&self, slot: PlayerSlot) -> ActionLabel {
        self.tally(slot).winner()
    }

    /// Votes collected across both slots
    pub fn total_votes(&self) -> u32 {
        self.slots.iter().map(VoteTally::total).sum()
    }
}
