#[cfg(feature = "datasize")]
use datasize::DataSize;
use serde::{Deserialize, Serialize};

use crate::{AccountHash, TimeDiff, Timestamp};

/// The bidder whose single longest uncontested tenure so far is the
/// greatest, together with that tenure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct EnduranceChampion {
    /// The champion's address.
    pub address: AccountHash,
    /// When the champion's record tenure began.
    pub start: Timestamp,
    /// The record tenure length.
    pub duration: TimeDiff,
}

/// The bidder who held the endurance-champion position for the longest
/// completed stretch of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct ChronoWarrior {
    /// The chrono-warrior's address.
    pub address: AccountHash,
    /// The completed championship stretch length.
    pub duration: TimeDiff,
}

/// Champion projection returned by the current-champions query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct CurrentChampions {
    /// The endurance champion as of "now".
    pub endurance_champion: EnduranceChampion,
    /// The chrono-warrior as of "now".
    pub chrono_warrior: ChronoWarrior,
}

/// Champion bookkeeping of the current round.
///
/// The state machine is driven by bid timestamps. `update_on_bid` runs
/// whenever a bidder's tenure ends (a later bid arrives, or the round
/// settles), and `fold_chrono_warrior` closes a champion's stretch.
/// `chrono_warrior.duration` is monotonically non-decreasing within a
/// round; an unset chrono-warrior loses to any fold, including a
/// zero-length stretch.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "datasize", derive(DataSize))]
pub struct ChampionState {
    /// The current endurance champion, if any tenure has completed.
    pub endurance_champion: Option<EnduranceChampion>,
    /// The tenure length of the champion dethroned by the current one.
    pub prev_endurance_duration: TimeDiff,
    /// The current chrono-warrior, if any stretch has been folded.
    pub chrono_warrior: Option<ChronoWarrior>,
}

impl ChampionState {
    /// Notes that `previous_bidder`'s tenure, which began at
    /// `tenure_start`, ended at `now`.
    ///
    /// A tenure strictly longer than the current champion's record
    /// dethrones them: the outgoing champion's completed stretch is
    /// folded first (it ended the moment the new record tenure matched
    /// the old record, `tenure_start + old duration`), then the previous
    /// bidder takes the championship.
    pub fn update_on_bid(
        &mut self,
        previous_bidder: AccountHash,
        tenure_start: Timestamp,
        now: Timestamp,
    ) {
        let tenure = now.saturating_diff(tenure_start);
        let outgoing = match self.endurance_champion {
            None => None,
            Some(champion) if tenure > champion.duration => Some(champion),
            Some(_) => return,
        };
        if let Some(champion) = outgoing {
            self.fold_chrono_warrior(tenure_start.saturating_add(champion.duration));
            self.prev_endurance_duration = champion.duration;
        }
        self.endurance_champion = Some(EnduranceChampion {
            address: previous_bidder,
            start: tenure_start,
            duration: tenure,
        });
    }

    /// Folds the current champion's stretch, ending at `chrono_end`,
    /// into the chrono-warrior.
    ///
    /// The stretch begins where the previous champion's record was
    /// beaten: `champion.start + prev_endurance_duration`. Promotes the
    /// champion to chrono-warrior when the stretch is strictly longer
    /// than the recorded one (or when none is recorded yet).
    pub fn fold_chrono_warrior(&mut self, chrono_end: Timestamp) {
        let champion = match self.endurance_champion {
            Some(champion) => champion,
            None => return,
        };
        let chrono_start = champion.start.saturating_add(self.prev_endurance_duration);
        let duration = chrono_end.saturating_diff(chrono_start);
        let improves = match &self.chrono_warrior {
            None => true,
            Some(warrior) => duration > warrior.duration,
        };
        if improves {
            self.chrono_warrior = Some(ChronoWarrior {
                address: champion.address,
                duration,
            });
        }
    }

    /// Computes the champions as they would stand if the round settled
    /// at `now`, without mutating the recorded state.
    ///
    /// Returns `None` only if the state machine has seen no tenure at
    /// all (which cannot happen once the round has a last bidder).
    pub fn project(
        &self,
        last_bidder: AccountHash,
        last_bid_time: Timestamp,
        now: Timestamp,
    ) -> Option<CurrentChampions> {
        let mut state = self.clone();
        state.update_on_bid(last_bidder, last_bid_time, now);
        state.fold_chrono_warrior(now);
        match (state.endurance_champion, state.chrono_warrior) {
            (Some(endurance_champion), Some(chrono_warrior)) => Some(CurrentChampions {
                endurance_champion,
                chrono_warrior,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(value: u8) -> AccountHash {
        AccountHash::new([value; 32])
    }

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    /// Replays a bid sequence through the state machine the way the
    /// engine does: each bid ends the previous bidder's tenure.
    fn replay(bids: &[(u64, AccountHash)]) -> ChampionState {
        let mut state = ChampionState::default();
        for window in bids.windows(2) {
            let (prev_time, prev_bidder) = window[0];
            let (bid_time, _) = window[1];
            state.update_on_bid(prev_bidder, at(prev_time), at(bid_time));
        }
        state
    }

    #[test]
    fn longest_gap_wins_endurance() {
        let (x, y) = (account(1), account(2));
        let state = replay(&[(0, x), (1_000, y), (6_000, x), (7_000, y), (8_000, x)]);

        let champion = state.endurance_champion.expect("should have champion");
        assert_eq!(champion.address, y);
        assert_eq!(champion.start, at(1_000));
        assert_eq!(champion.duration, TimeDiff::from_secs(5_000));
    }

    #[test]
    fn chrono_stretch_outlives_single_tenure() {
        let (x, y) = (account(1), account(2));
        // X's record of 1000 stands until Y's tenure exceeds it at 2000.
        let mut state = replay(&[(0, x), (1_000, y), (6_000, x)]);
        let warrior = state.chrono_warrior.expect("should have warrior");
        assert_eq!(warrior.address, x);
        assert_eq!(warrior.duration, TimeDiff::from_secs(2_000));

        // Settling at 9000 folds Y's still-open stretch: 2000..9000.
        state.update_on_bid(x, at(6_000), at(9_000));
        state.fold_chrono_warrior(at(9_000));
        let warrior = state.chrono_warrior.expect("should have warrior");
        assert_eq!(warrior.address, y);
        assert_eq!(warrior.duration, TimeDiff::from_secs(7_000));
    }

    #[test]
    fn chrono_duration_never_decreases() {
        let (x, y, z) = (account(1), account(2), account(3));
        let mut state = ChampionState::default();
        let mut last_duration = TimeDiff::zero();
        let bids = [
            (0, x),
            (5_000, y),
            (5_100, z),
            (5_200, x),
            (11_000, y),
            (11_050, z),
        ];
        for window in bids.windows(2) {
            let (prev_time, prev_bidder) = window[0];
            let (bid_time, _) = window[1];
            state.update_on_bid(prev_bidder, at(prev_time), at(bid_time));
            if let Some(warrior) = &state.chrono_warrior {
                assert!(warrior.duration >= last_duration);
                last_duration = warrior.duration;
            }
        }
    }

    #[test]
    fn projection_leaves_state_untouched() {
        let (x, y) = (account(1), account(2));
        let state = replay(&[(0, x), (1_000, y), (6_000, x)]);
        let before = state.clone();

        let projected = state
            .project(x, at(6_000), at(50_000))
            .expect("should project");
        assert_eq!(projected.endurance_champion.address, x);
        assert_eq!(
            projected.endurance_champion.duration,
            TimeDiff::from_secs(44_000)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn first_tenure_becomes_champion_and_warrior() {
        let x = account(1);
        let mut state = ChampionState::default();
        state.update_on_bid(x, at(100), at(400));
        state.fold_chrono_warrior(at(400));

        let champion = state.endurance_champion.expect("should have champion");
        assert_eq!(champion.duration, TimeDiff::from_secs(300));
        let warrior = state.chrono_warrior.expect("should have warrior");
        assert_eq!(warrior.address, x);
        assert_eq!(warrior.duration, TimeDiff::from_secs(300));
    }
}
