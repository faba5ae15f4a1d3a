use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptyQuiz,
    SignedOut,
    InvalidInput,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::EmptyQuiz => "Não foi possível iniciar o quiz: nenhuma questão disponível.",
            ViewError::SignedOut => "Entre com seu usuário para ver seu perfil.",
            ViewError::InvalidInput => "Verifique os dados informados.",
            ViewError::Unknown => "Algo deu errado. Tente novamente.",
        }
    }
}

impl From<services::QuizError> for ViewError {
    fn from(err: services::QuizError) -> Self {
        match err {
            services::QuizError::EmptyQuestionSet { .. } => ViewError::EmptyQuiz,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
