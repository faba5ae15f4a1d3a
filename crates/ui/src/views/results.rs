use dioxus::prelude::*;
use dioxus_router::use_navigator;

use decifra_core::model::{QuizOutcome, Topic};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{ResultsVm, SaveStatus};

#[component]
pub fn ResultsView(topic: String, score: u32, total: u32) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let resolved = Topic::resolve(&topic).topic();
    let reward = ctx.quiz().config().reward();
    let outcome = QuizOutcome::from_score(resolved, score, total, reward);
    let vm = ResultsVm::from_outcome(&outcome);

    // Only a quiz that just finished gets recorded; reloads and revisits do not.
    let pending = use_hook({
        let ctx = ctx.clone();
        move || ctx.take_pending_outcome().filter(|stashed| *stashed == outcome)
    });

    let save = use_resource(move || {
        let ctx = ctx.clone();
        async move {
            let Some(outcome) = pending else {
                return SaveStatus::None;
            };
            let result = ctx.recorder().record(&ctx.identity(), &outcome).await;
            if let Err(err) = &result {
                tracing::warn!(error = %err, "result could not be saved");
            }
            SaveStatus::from_record(&result)
        }
    });
    let status = save
        .value()
        .read()
        .as_ref()
        .copied()
        .unwrap_or(SaveStatus::Saving);
    let stars = vm.star_glyphs();
    let retry_topic = resolved.key().to_string();

    rsx! {
        div { class: "page results",
            h2 { "{vm.message}" }
            p { class: "stars", "{stars}" }
            p { class: "topic", "{vm.title}" }
            div { class: "score-card",
                p { class: "score-total", "{vm.score} pontos" }
                dl { class: "breakdown",
                    dt { "Acertos" }
                    dd { class: "correct", "{vm.correct}" }
                    dt { "Erros" }
                    dd { class: "wrong", "{vm.wrong}" }
                    dt { "Precisão" }
                    dd { class: "accuracy", "{vm.accuracy}%" }
                }
            }
            p { class: "encouragement", "{vm.encouragement}" }
            if let Some(label) = status.label() {
                p { class: "save-status", "{label}" }
            }
            div { class: "actions",
                button {
                    class: "btn primary",
                    onclick: move |_| {
                        navigator.push(Route::Quiz { topic: retry_topic.clone() });
                    },
                    "Tentar Novamente"
                }
                button {
                    class: "btn",
                    onclick: move |_| {
                        navigator.push(Route::Home {});
                    },
                    "Voltar ao Início"
                }
            }
        }
    }
}
