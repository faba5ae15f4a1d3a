use decifra_core::model::Question;
use services::QuizSnapshot;

use super::time_fmt::format_countdown;

/// Visual state of one answer option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    Idle,
    /// The right answer, revealed after resolution.
    Correct,
    /// The user's wrong pick.
    Wrong,
    /// Neither picked nor correct, after resolution.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Idle => "option",
            OptionState::Correct => "option option-correct",
            OptionState::Wrong => "option option-wrong",
            OptionState::Dimmed => "option option-dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub text: String,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub title: &'static str,
    pub position: String,
    pub progress_percent: u32,
    pub countdown: String,
    pub time_low: bool,
    pub score: String,
    pub prompt: String,
    pub snippet: Option<String>,
    pub options: Vec<OptionVm>,
    pub locked: bool,
    pub timed_out: bool,
    pub complete: bool,
}

/// Seconds left at which the countdown is highlighted.
const LOW_TIME_SECS: u32 = 10;

impl QuizVm {
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Self {
        let total = snapshot.total_questions.max(1);
        let number = snapshot.question_index + 1;
        let progress_percent = u32::try_from(number * 100 / total).unwrap_or(100);

        Self {
            title: snapshot.topic.title(),
            position: format!("Questão {number} de {}", snapshot.total_questions),
            progress_percent,
            countdown: format_countdown(snapshot.time_remaining),
            time_low: snapshot.time_remaining <= LOW_TIME_SECS,
            score: format!("{} pts", snapshot.score),
            prompt: snapshot.question.prompt().to_string(),
            snippet: snapshot.question.snippet().map(str::to_string),
            options: map_options(&snapshot.question, snapshot),
            locked: snapshot.is_locked(),
            timed_out: snapshot.resolution.is_some_and(|r| r.timed_out()),
            complete: snapshot.is_complete(),
        }
    }
}

fn map_options(question: &Question, snapshot: &QuizSnapshot) -> Vec<OptionVm> {
    question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let state = match snapshot.resolution {
                None => OptionState::Idle,
                Some(r) if index == r.correct_index => OptionState::Correct,
                Some(r) if r.selected == Some(index) => OptionState::Wrong,
                Some(_) => OptionState::Dimmed,
            };
            OptionVm {
                index,
                label: Question::option_label(index).map_or_else(String::new, String::from),
                text: text.clone(),
                state,
            }
        })
        .collect()
}
