// Pose input system
//
// Turns the landmark stream of an external pose detector into one combat
// action per player per turn.
//
// ## Architecture
//
// - `landmark`: Frame, body and landmark data as delivered by the detector
// - `assignment`: Which player slot a tracked body belongs to
// - `classifier`: Per-frame action label from body proportions
// - `tally`: Majority vote over a turn window
// - `source`: Where frames come from (live channel or recorded file)
// - `session`: Capture session tying it together, one `scan_turn` per turn
//
// ## Usage Example
//
// ```rust
// let source = ChannelSource::spawn_reader(BufReader::new(io::stdin()));
// let mut session = PoseSession::new(source, ActionClassifier::default(), GameMode::TwoPlayer);
//
// let scan = session.scan_turn(Duration::from_secs(5))?;
// if let session::TurnActions::Pair(first, second) = scan.actions {
//     // resolve the turn
// }
// ```

pub mod assignment;
pub mod classifier;
pub mod landmark;
pub mod session;
pub mod source;
pub mod tally;

// Re-export commonly used types
pub use assignment::PlayerSlot;
pub use classifier::{ActionClassifier, ClassifierConfig};
pub use session::PoseSession;
pub use source::{ChannelSource, LandmarkSource, ReplaySource, SourceError};
