use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use services::{QuizRun, QuizSnapshot};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{OptionVm, QuizVm};

/// Fresh session per mount; the key forces a remount when the topic changes.
/// Navigating to the same `/quiz/<topic>` while already on it keeps the running
/// session, so every entry point must come from another route.
#[component]
pub fn QuizView(topic: String) -> Element {
    rsx! {
        QuizScreen { key: "{topic}", topic: topic.clone() }
    }
}

#[component]
fn QuizScreen(topic: String) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    // Owning the run here ties the driver's lifetime to the screen.
    let mut run = use_signal(|| None::<QuizRun>);
    let mut snapshot = use_signal(|| None::<QuizSnapshot>);
    let mut error = use_signal(|| None::<ViewError>);

    use_future(move || {
        let ctx = ctx.clone();
        let topic = topic.clone();
        async move {
            let (handle, completion) = match ctx.quiz().start(&topic) {
                Ok(started) => started,
                Err(err) => {
                    tracing::warn!(%topic, error = %err, "quiz could not start");
                    error.set(Some(ViewError::from(err)));
                    return;
                }
            };
            let mut updates = handle.subscribe();
            snapshot.set(Some(handle.snapshot()));
            run.set(Some(handle));

            while updates.changed().await.is_ok() {
                let current = updates.borrow_and_update().clone();
                let complete = current.is_complete();
                snapshot.set(Some(current));
                if complete {
                    break;
                }
            }

            if let Some(outcome) = completion.wait().await {
                ctx.stash_outcome(outcome);
                navigator.push(Route::Results {
                    topic: outcome.topic.key().to_string(),
                    score: outcome.score,
                    total: outcome.total_questions,
                });
            }
        }
    });

    let on_select = use_callback(move |index: usize| {
        if let Some(run) = run.read().as_ref() {
            run.submit_answer(index);
        }
    });

    if let Some(err) = error() {
        return rsx! {
            div { class: "page quiz",
                p { class: "error", "{err.message()}" }
                Link { class: "btn", to: Route::Home {}, "Voltar ao Início" }
            }
        };
    }

    let Some(current) = snapshot.read().clone() else {
        return rsx! {
            div { class: "page quiz",
                p { "Carregando…" }
            }
        };
    };
    let vm = QuizVm::from_snapshot(&current);

    if vm.complete {
        return rsx! {
            div { class: "page quiz complete",
                h2 { "Quiz Completo!" }
                p { "Calculando seu resultado…" }
                p { class: "score", "{vm.score}" }
            }
        };
    }

    let countdown_class = if vm.time_low { "countdown low" } else { "countdown" };

    rsx! {
        div { class: "page quiz",
            header { class: "quiz-header",
                div {
                    h2 { "{vm.title}" }
                    p { class: "position", "{vm.position}" }
                }
                div { class: "quiz-status",
                    span { class: "{countdown_class}", "{vm.countdown}" }
                    span { class: "score", "{vm.score}" }
                }
            }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {vm.progress_percent}%" }
            }
            section { class: "question",
                p { class: "prompt", "{vm.prompt}" }
                if let Some(snippet) = vm.snippet.as_ref() {
                    pre { class: "snippet",
                        code { "{snippet}" }
                    }
                }
            }
            ul { class: "options",
                for option in vm.options.iter().cloned() {
                    OptionButton {
                        key: "{option.index}",
                        option,
                        locked: vm.locked,
                        on_select,
                    }
                }
            }
            if vm.timed_out {
                p { class: "timeout", "Tempo esgotado!" }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, locked: bool, on_select: Callback<usize>) -> Element {
    let class = option.state.class();
    let index = option.index;
    rsx! {
        li {
            button {
                class: "{class}",
                disabled: locked,
                onclick: move |_| on_select.call(index),
                span { class: "option-label", "{option.label}" }
                span { class: "option-text", "{option.text}" }
            }
        }
    }
}
