//! Scheduling domain models.
//!
//! Plain value snapshots of the entities the scheduler reads and the
//! schedule it produces. No persistence behavior lives here.
//!
//! # Domain Mapping
//!
//! | section-sched | Classic scheduling |
//! |---------------|--------------------|
//! | Train | Job |
//! | Section | Single machine |
//! | Travel time | Processing time |
//! | Hold / departure | Release time |
//! | Headway | Sequence-independent setup gap |

mod schedule;
mod section;
pub(crate) mod time;
mod train;

pub use schedule::{Schedule, ScheduleEntry};
pub use section::{Section, SectionId, SectionType};
pub use train::{PriorityTier, Train, TrainCategory, TrainId, DEFAULT_TRAIN_SPEED_KMH};
