use dioxus::prelude::*;

use decifra_core::model::{MainLanguage, UserId};
use services::ProfileServiceError;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, ProfileVm};

#[component]
pub fn ProfileView() -> Element {
    let ctx = use_context::<AppContext>();

    match ctx.identity().user_id() {
        None => rsx! {
            div { class: "page profile",
                h2 { "Perfil" }
                p { class: "hint", "{ViewError::SignedOut.message()}" }
            }
        },
        Some(user_id) => rsx! {
            ProfilePage { user_id }
        },
    }
}

#[component]
fn ProfilePage(user_id: UserId) -> Element {
    let ctx = use_context::<AppContext>();
    let profiles = ctx.profiles();

    let mut resource = use_resource(move || {
        let profiles = profiles.clone();
        async move {
            let overview = profiles
                .overview(user_id)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(ProfileVm::from_overview(&overview))
        }
    });
    let state = view_state_from_resource(&resource);

    let on_saved = use_callback(move |()| resource.restart());

    rsx! {
        div { class: "page profile",
            h2 { "Perfil" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Carregando…" }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(vm) => rsx! {
                    ProfileSummary { vm: vm.clone() }
                    ProfileForm {
                        user_id,
                        display_name: vm.display_name.clone(),
                        main_language: vm.main_language,
                        on_saved,
                    }
                    History { rows: vm.history.clone() }
                },
            }
        }
    }
}

#[component]
fn ProfileSummary(vm: ProfileVm) -> Element {
    rsx! {
        section { class: "profile-summary",
            h3 { class: "display-name", "{vm.display_name}" }
            p { class: "main-language", "{vm.main_language_label()}" }
            div { class: "stats",
                div { class: "stat",
                    span { class: "stat-value", "{vm.best_score}" }
                    span { class: "stat-label", "Melhor pontuação" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{vm.average_accuracy}%" }
                    span { class: "stat-label", "Precisão média" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{vm.total_quizzes}" }
                    span { class: "stat-label", "Quizzes" }
                }
            }
        }
    }
}

#[component]
fn ProfileForm(
    user_id: UserId,
    display_name: String,
    main_language: MainLanguage,
    on_saved: Callback<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let mut name = use_signal(|| display_name.clone());
    let mut language = use_signal(|| main_language);
    let mut error = use_signal(|| None::<ViewError>);
    let mut saving = use_signal(|| false);

    let on_submit = move |_: MouseEvent| {
        if saving() {
            return;
        }
        let profiles = ctx.profiles();
        let display_name = name();
        let main_language = language();
        saving.set(true);
        spawn(async move {
            let result = profiles
                .save_profile(user_id, &display_name, main_language)
                .await;
            saving.set(false);
            match result {
                Ok(_) => {
                    error.set(None);
                    on_saved.call(());
                }
                Err(ProfileServiceError::Profile(_)) => error.set(Some(ViewError::InvalidInput)),
                Err(err) => {
                    tracing::warn!(error = %err, "profile could not be saved");
                    error.set(Some(ViewError::Unknown));
                }
            }
        });
    };

    rsx! {
        section { class: "profile-form",
            h3 { "Editar perfil" }
            label { r#for: "profile-name", "Nome" }
            input {
                id: "profile-name",
                value: "{name}",
                oninput: move |evt| name.set(evt.value()),
            }
            label { r#for: "profile-language", "Linguagem principal" }
            select {
                id: "profile-language",
                onchange: move |evt| {
                    if let Ok(parsed) = evt.value().parse::<MainLanguage>() {
                        language.set(parsed);
                    }
                },
                for choice in MainLanguage::ALL {
                    option {
                        key: "{choice.key()}",
                        value: "{choice.key()}",
                        selected: choice == language(),
                        "{choice.label()}"
                    }
                }
            }
            if let Some(err) = error() {
                p { class: "error", "{err.message()}" }
            }
            button {
                class: "btn primary",
                disabled: saving(),
                onclick: on_submit,
                "Salvar"
            }
        }
    }
}

#[component]
fn History(rows: Vec<HistoryRowVm>) -> Element {
    rsx! {
        section { class: "history",
            h3 { "Histórico" }
            if rows.is_empty() {
                p { class: "empty", "Nenhum quiz realizado ainda." }
            } else {
                ul {
                    for row in rows {
                        li { key: "{row.id}", class: "history-row",
                            span { class: "history-topic", "{row.title}" }
                            span { class: "history-score", "{row.score} pts" }
                            span { class: "history-accuracy", "{row.accuracy}% de {row.total_questions}" }
                            span { class: "history-when", "{row.when}" }
                        }
                    }
                }
            }
        }
    }
}
