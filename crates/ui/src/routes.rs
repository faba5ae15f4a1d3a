use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{HomeView, ProfileView, QuizView, ResultsView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:topic", QuizView)] Quiz { topic: String },
        #[route("/results/:topic/:score/:total", ResultsView)]
        Results { topic: String, score: u32, total: u32 },
        #[route("/profile", ProfileView)] Profile {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let signed_in = !ctx.identity().is_anonymous();

    rsx! {
        header { class: "topbar",
            Link { class: "brand", to: Route::Home {}, "Decifra" }
            nav {
                Link { to: Route::Home {}, "Início" }
                if signed_in {
                    Link { to: Route::Profile {}, "Perfil" }
                }
            }
        }
    }
}
