use decifra_core::model::{Language, Topic};
use services::QuestionBank;

/// One selectable entry on the home screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackCardVm {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: &'static str,
    pub question_count: usize,
}

impl TrackCardVm {
    #[must_use]
    pub fn count_label(&self) -> String {
        match self.question_count {
            1 => "1 questão".to_string(),
            n => format!("{n} questões"),
        }
    }
}

#[must_use]
pub fn map_track_cards(bank: &dyn QuestionBank) -> Vec<TrackCardVm> {
    Language::ALL
        .into_iter()
        .map(|language| TrackCardVm {
            key: language.key(),
            title: language.title(),
            description: language.description(),
            difficulty: language.difficulty().label(),
            question_count: bank.pool_size(Topic::Language(language)),
        })
        .collect()
}

#[must_use]
pub fn quick_mode_card(bank: &dyn QuestionBank) -> TrackCardVm {
    TrackCardVm {
        key: Topic::RANDOM_KEY,
        title: Topic::Random.title(),
        description: "Questões aleatórias de todas as linguagens",
        difficulty: "Misto",
        question_count: bank.pool_size(Topic::Random),
    }
}
