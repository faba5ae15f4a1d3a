use decifra_core::model::QuizOutcome;
use services::{RecordStatus, RecorderError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub title: &'static str,
    pub score: u32,
    pub correct: u32,
    pub wrong: u32,
    pub total: u32,
    pub accuracy: u8,
    pub message: &'static str,
    pub stars: u8,
    pub encouragement: &'static str,
}

impl ResultsVm {
    #[must_use]
    pub fn from_outcome(outcome: &QuizOutcome) -> Self {
        let performance = outcome.performance();
        Self {
            title: outcome.topic.title(),
            score: outcome.score,
            correct: outcome.correct_answers,
            wrong: outcome.wrong_answers(),
            total: outcome.total_questions,
            accuracy: outcome.accuracy(),
            message: performance.message(),
            stars: performance.stars(),
            encouragement: performance.encouragement(),
        }
    }

    /// Filled then empty stars, always three glyphs.
    #[must_use]
    pub fn star_glyphs(&self) -> String {
        let filled = usize::from(self.stars.min(3));
        format!("{}{}", "★".repeat(filled), "☆".repeat(3 - filled))
    }
}

/// Progress of persisting the result shown on the results screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing to save (revisited page, or zero score).
    None,
    Anonymous,
    Saving,
    Saved,
    Failed,
}

impl SaveStatus {
    #[must_use]
    pub fn from_record(result: &Result<RecordStatus, RecorderError>) -> Self {
        match result {
            Ok(RecordStatus::Recorded(_)) => SaveStatus::Saved,
            Ok(RecordStatus::SkippedAnonymous) => SaveStatus::Anonymous,
            Ok(RecordStatus::SkippedZeroScore) => SaveStatus::None,
            Err(_) => SaveStatus::Failed,
        }
    }

    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            SaveStatus::None => None,
            SaveStatus::Anonymous => Some("Entre com seu usuário para salvar seus resultados."),
            SaveStatus::Saving => Some("Salvando…"),
            SaveStatus::Saved => Some("Resultado salvo no seu perfil!"),
            SaveStatus::Failed => Some("Não foi possível salvar o resultado."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decifra_core::model::{Language, ResultId, Topic};
    use storage::repository::StorageError;

    #[test]
    fn two_of_three_is_a_good_job() {
        let outcome = QuizOutcome::from_score(Topic::Language(Language::Java), 200, 3, 100);
        let vm = ResultsVm::from_outcome(&outcome);
        assert_eq!(vm.title, "Java");
        assert_eq!(vm.correct, 2);
        assert_eq!(vm.wrong, 1);
        assert_eq!(vm.accuracy, 67);
        assert_eq!(vm.message, "Bom trabalho!");
        assert_eq!(vm.star_glyphs(), "★☆☆");
    }

    #[test]
    fn perfect_run_gets_three_stars() {
        let outcome = QuizOutcome::from_score(Topic::Random, 500, 5, 100);
        let vm = ResultsVm::from_outcome(&outcome);
        assert_eq!(vm.title, "Modo Rápido");
        assert_eq!(vm.message, "Excelente!");
        assert_eq!(vm.star_glyphs(), "★★★");
        assert!(vm.encouragement.starts_with("Parabéns"));
    }

    #[test]
    fn save_status_maps_recorder_results() {
        assert_eq!(
            SaveStatus::from_record(&Ok(RecordStatus::Recorded(ResultId::new(1)))),
            SaveStatus::Saved
        );
        assert_eq!(
            SaveStatus::from_record(&Ok(RecordStatus::SkippedAnonymous)),
            SaveStatus::Anonymous
        );
        let failed = Err(RecorderError::Storage(StorageError::Connection("x".into())));
        assert_eq!(SaveStatus::from_record(&failed), SaveStatus::Failed);
        assert_eq!(SaveStatus::None.label(), None);
        assert_eq!(SaveStatus::Saving.label(), Some("Salvando…"));
    }
}
