use decifra_core::model::MainLanguage;
use services::ProfileOverview;

use super::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub id: u64,
    pub title: &'static str,
    pub score: u32,
    pub accuracy: u8,
    pub total_questions: u32,
    pub when: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileVm {
    pub display_name: String,
    pub main_language: MainLanguage,
    pub best_score: u32,
    pub average_accuracy: u8,
    pub total_quizzes: u32,
    pub history: Vec<HistoryRowVm>,
}

impl ProfileVm {
    #[must_use]
    pub fn from_overview(overview: &ProfileOverview) -> Self {
        Self {
            display_name: overview.display_name().to_string(),
            main_language: overview.main_language(),
            best_score: overview.stats.best_score,
            average_accuracy: overview.stats.average_accuracy,
            total_quizzes: overview.stats.total_quizzes,
            history: overview
                .results
                .iter()
                .map(|row| HistoryRowVm {
                    id: row.id.value(),
                    title: row.record.topic.title(),
                    score: row.record.score,
                    accuracy: row.record.accuracy,
                    total_questions: row.record.total_questions,
                    when: format_datetime(row.record.recorded_at),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn main_language_label(&self) -> &'static str {
        self.main_language.label()
    }
}
