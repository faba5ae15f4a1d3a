mod identity;
mod ids;
mod profile;
mod question;
mod result;
mod topic;

pub use identity::Identity;
pub use ids::{ParseIdError, ResultId, UserId};
pub use profile::{MainLanguage, Profile, ProfileError, ProfileStats};
pub use question::{Question, QuestionDraft, QuestionError};
pub use result::{Performance, QuizOutcome, ResultRecord, accuracy_percent};
pub use topic::{Difficulty, Language, Topic, TopicError, TopicResolution};
