use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{TrackCardVm, map_track_cards, quick_mode_card};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let bank = ctx.quiz().bank();
    let tracks = map_track_cards(bank.as_ref());
    let quick = quick_mode_card(bank.as_ref());
    let greeting = if ctx.identity().is_anonymous() {
        "Escolha uma linguagem e teste sua lógica."
    } else {
        "Bem-vindo de volta! Seus resultados serão salvos no perfil."
    };

    rsx! {
        div { class: "page home",
            section { class: "hero",
                h1 { "Decifra" }
                p { class: "subtitle", "{greeting}" }
            }
            section { class: "tracks",
                for card in tracks {
                    TrackCard { key: "{card.key}", card: card.clone() }
                }
            }
            section { class: "quick-mode",
                TrackCard { card: quick }
            }
        }
    }
}

#[component]
fn TrackCard(card: TrackCardVm) -> Element {
    let count = card.count_label();
    rsx! {
        Link {
            class: "track-card",
            to: Route::Quiz { topic: card.key.to_string() },
            h3 { "{card.title}" }
            p { class: "track-description", "{card.description}" }
            div { class: "track-meta",
                span { class: "badge", "{card.difficulty}" }
                span { class: "count", "{count}" }
            }
        }
    }
}
