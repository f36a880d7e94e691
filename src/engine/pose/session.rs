// Capture session - coordinates source, classifier and vote counting
//
// The session is the one owner of capture state: the frame source, the
// classifier and the timestamp of the last accepted frame. Frames reach the
// vote counters only through `scan_turn`, which is the single writer.

use super::assignment::PlayerSlot;
use super::classifier::ActionClassifier;
use super::landmark::PoseFrame;
use super::source::{LandmarkSource, SourceError};
use super::tally::ActionAggregator;
use crate::core::config::GameMode;
use crate::engine::turn_clock::TurnClock;
use crate::game::action::ActionLabel;
use log::{debug, warn};
use std::time::Duration;

/// The actions read from the camera for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnActions {
    /// One player in front of the camera
    Single(ActionLabel),
    /// Player one, player two
    Pair(ActionLabel, ActionLabel),
}

impl TurnActions {
    /// Player one's action
    pub fn first(&self) -> ActionLabel {
        match *self {
            TurnActions::Single(action) | TurnActions::Pair(action, _) => action,
        }
    }

    /// Player two's action, when player two is a person
    pub fn second(&self) -> Option<ActionLabel> {
        match *self {
            TurnActions::Single(_) => None,
            TurnActions::Pair(_, action) => Some(action),
        }
    }
}

/// Result of scanning one turn window
#[derive(Debug, Clone)]
pub struct TurnScan {
    pub actions: TurnActions,
    /// Votes behind the actions
    pub votes: ActionAggregator,
    /// Frames delivered by the source
    pub frames_seen: u64,
    /// Frames discarded for arriving out of order
    pub frames_dropped: u64,
    /// Bodies the classifier declined to vote on
    pub abstentions: u64,
    /// The source closed before the window ended
    pub source_closed: bool,
}

/// Live capture state for one match
pub struct PoseSession<S> {
    source: S,
    classifier: ActionClassifier,
    mode: GameMode,
    /// Timestamp of the most recent accepted frame
    last_timestamp_ms: Option<u64>,
}

impl<S: LandmarkSource> PoseSession<S> {
    pub fn new(source: S, classifier: ActionClassifier, mode: GameMode) -> Self {
        Self {
            source,
            classifier,
            mode,
            last_timestamp_ms: None,
        }
    }

    /// Accept a frame only if it is newer than the last accepted one
    pub fn accept(&mut self, frame: &PoseFrame) -> bool {
        match self.last_timestamp_ms {
            Some(last) if frame.timestamp_ms <= last => false,
            _ => {
                self.last_timestamp_ms = Some(frame.timestamp_ms);
                true
            }
        }
    }

    /// Collect votes until the window closes and resolve them into actions
    ///
    /// Closes on schedule even if the source stalls. If the source closes
    /// mid-window, the votes gathered so far still decide the turn.
    pub fn scan_turn(&mut self, duration: Duration) -> Result<TurnScan, SourceError> {
        let mut clock = TurnClock::start(duration);
        let mut votes = ActionAggregator::new();
        let mut frames_dropped = 0;
        let mut abstentions = 0;
        let mut source_closed = false;

        while !clock.is_expired() {
            let frame = match self.source.next_frame(clock.remaining()) {
                Ok(Some(frame)) => frame,
                Ok(None) => continue,
                Err(SourceError::Closed) => {
                    warn!(
                        "Capture closed mid-turn, resolving with {} votes",
                        votes.total_votes()
                    );
                    source_closed = true;
                    break;
                }
                Err(err) => return Err(err),
            };

            clock.mark_frame();

            if !self.accept(&frame) {
                debug!(
                    "Dropped stale frame at {}ms (last accepted {:?})",
                    frame.timestamp_ms, self.last_timestamp_ms
                );
                frames_dropped += 1;
                continue;
            }

            for body in &frame.bodies {
                match self.classifier.observe(body, self.mode) {
                    Some((slot, label)) => votes.record(slot, label),
                    None => {
                        debug!("Abstained on a body at {}ms", frame.timestamp_ms);
                        abstentions += 1;
                    }
                }
            }
        }

        let actions = match self.mode {
            GameMode::TwoPlayer => TurnActions::Pair(
                votes.resolve(PlayerSlot::One),
                votes.resolve(PlayerSlot::Two),
            ),
            GameMode::PlayerVsAi => TurnActions::Single(votes.resolve(PlayerSlot::One)),
        };

        debug!(
            "Turn window closed: {} frames ({:.1} fps), {} dropped, {} abstentions, votes {}/{}",
            clock.frame_count(),
            clock.observed_fps(),
            frames_dropped,
            abstentions,
            votes.tally(PlayerSlot::One).total(),
            votes.tally(PlayerSlot::Two).total()
        );

        Ok(TurnScan {
            actions,
            votes,
            frames_seen: clock.frame_count(),
            frames_dropped,
            abstentions,
            source_closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::landmark::fixtures::{self, frame};
    use super::super::source::ChannelSource;
    use super::*;
    use std::collections::VecDeque;
    use std::time::Instant;

    /// Source that hands out a fixed list of frames, then stalls
    struct StalledSource {
        frames: VecDeque<PoseFrame>,
    }

    impl LandmarkSource for StalledSource {
        fn next_frame(&mut self, timeout: Duration) -> Result<Option<PoseFrame>, SourceError> {
            match self.frames.pop_front() {
                Some(frame) => Ok(Some(frame)),
                None => {
                    std::thread::sleep(timeout);
                    Ok(None)
                }
            }
        }
    }

    /// Source whose I/O fails
    struct BrokenSource;

    impl LandmarkSource for BrokenSource {
        fn next_frame(&mut self, _timeout: Duration) -> Result<Option<PoseFrame>, SourceError> {
            Err(SourceError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "camera unplugged",
            )))
        }
    }

    fn closed_channel(frames: Vec<PoseFrame>) -> ChannelSource {
        let (sender, source) = ChannelSource::pair();
        for frame in frames {
            sender.send(frame).unwrap();
        }
        source
    }

    #[test]
    fn test_two_player_majority() {
        let frames = vec![
            frame(1, vec![fixtures::punch(0.25), fixtures::guard(0.75)]),
            frame(2, vec![fixtures::punch(0.25), fixtures::guard(0.75)]),
            frame(3, vec![fixtures::idle(0.25), fixtures::raise(0.75)]),
        ];
        let mut session = PoseSession::new(
            closed_channel(frames),
            ActionClassifier::default(),
            GameMode::TwoPlayer,
        );

        let scan = session.scan_turn(Duration::from_secs(2)).unwrap();
        assert_eq!(
            scan.actions,
            TurnActions::Pair(ActionLabel::Attacking, ActionLabel::Defending)
        );
        assert_eq!(scan.frames_seen, 3);
        assert!(scan.source_closed);
    }

    #[test]
    fn test_single_player_counts_every_body() {
        let frames = vec![
            frame(1, vec![fixtures::raise(0.3), fixtures::raise(0.8)]),
            frame(2, vec![fixtures::punch(0.3)]),
        ];
        let mut session = PoseSession::new(
            closed_channel(frames),
            ActionClassifier::default(),
            GameMode::PlayerVsAi,
        );

        let scan = session.scan_turn(Duration::from_secs(2)).unwrap();
        assert_eq!(scan.actions, TurnActions::Single(ActionLabel::Healing));
        assert_eq!(scan.votes.tally(PlayerSlot::One).total(), 3);
    }

    #[test]
    fn test_stale_frames_dropped() {
        let frames = vec![
            frame(10, vec![fixtures::guard(0.25)]),
            frame(10, vec![fixtures::punch(0.25)]),
            frame(5, vec![fixtures::punch(0.25)]),
            frame(11, vec![fixtures::guard(0.25)]),
        ];
        let mut session = PoseSession::new(
            closed_channel(frames),
            ActionClassifier::default(),
            GameMode::TwoPlayer,
        );

        let scan = session.scan_turn(Duration::from_secs(2)).unwrap();
        assert_eq!(scan.frames_dropped, 2);
        assert_eq!(scan.actions.first(), ActionLabel::Defending);
        assert_eq!(session.last_timestamp_ms, Some(11));
    }

    #[test]
    fn test_abstentions_do_not_vote() {
        let mut hidden = fixtures::punch(0.25);
        hidden.left_wrist.visibility = 0.0;
        let frames = vec![frame(1, vec![hidden.clone()]), frame(2, vec![hidden])];
        let mut session = PoseSession::new(
            closed_channel(frames),
            ActionClassifier::default(),
            GameMode::TwoPlayer,
        );

        let scan = session.scan_turn(Duration::from_secs(2)).unwrap();
        assert_eq!(scan.abstentions, 2);
        assert_eq!(scan.votes.total_votes(), 0);
        assert_eq!(
            scan.actions,
            TurnActions::Pair(ActionLabel::Resting, ActionLabel::Resting)
        );
    }

    #[test]
    fn test_stalled_source_closes_on_schedule() {
        let source = StalledSource {
            frames: VecDeque::from(vec![frame(1, vec![fixtures::punch(0.25)])]),
        };
        let mut session = PoseSession::new(source, ActionClassifier::default(), GameMode::TwoPlayer);

        let started = Instant::now();
        let scan = session.scan_turn(Duration::from_millis(60)).unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= Duration::from_millis(60));
        assert!(elapsed < Duration::from_millis(500));
        assert!(!scan.source_closed);
        assert_eq!(
            scan.actions,
            TurnActions::Pair(ActionLabel::Attacking, ActionLabel::Resting)
        );
    }

    #[test]
    fn test_source_errors_propagate() {
        let mut session = PoseSession::new(BrokenSource, ActionClassifier::default(), GameMode::TwoPlayer);
        assert!(matches!(
            session.scan_turn(Duration::from_millis(50)),
            Err(SourceError::Io(_))
        ));
    }

    #[test]
    fn test_accept_requires_increasing_timestamps() {
        let mut session = PoseSession::new(
            closed_channel(Vec::new()),
            ActionClassifier::default(),
            GameMode::TwoPlayer,
        );
        assert!(session.accept(&frame(0, Vec::new())));
        assert!(!session.accept(&frame(0, Vec::new())));
        assert!(session.accept(&frame(1, Vec::new())));
    }

    #[test]
    fn test_turn_actions_accessors() {
        let pair = TurnActions::Pair(ActionLabel::Healing, ActionLabel::Attacking);
        assert_eq!(pair.first(), ActionLabel::Healing);
        assert_eq!(pair.second(), Some(ActionLabel::Attacking));
        assert_eq!(TurnActions::Single(ActionLabel::Resting).second(), None);
    }
}
