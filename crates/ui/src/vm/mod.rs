mod home_vm;
mod profile_vm;
mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use home_vm::{TrackCardVm, map_track_cards, quick_mode_card};
pub use profile_vm::{HistoryRowVm, ProfileVm};
pub use quiz_vm::{OptionState, OptionVm, QuizVm};
pub use results_vm::{ResultsVm, SaveStatus};
pub use time_fmt::{format_countdown, format_datetime};
