use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use decifra_core::model::Identity;
use decifra_core::time::fixed_now;
use services::{AppServices, AppServicesConfig, Clock, Shuffler};
use storage::bank::{QuestionBank, StaticQuestionBank};
use storage::repository::Storage;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{HomeView, ProfileView, QuizView, ResultsView};

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(String),
    Results { topic: String, score: u32, total: u32 },
    Profile,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    ctx: AppContext,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.ctx.clone());
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(topic) => rsx! { QuizView { topic } },
        ViewKind::Results { topic, score, total } => rsx! { ResultsView { topic, score, total } },
        ViewKind::Profile => rsx! { ProfileView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub ctx: AppContext,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, identity: Identity) -> ViewHarness {
    let bank: Arc<dyn QuestionBank> =
        Arc::new(StaticQuestionBank::builtin().expect("builtin bank"));
    setup_view_harness_with_bank(view, identity, bank)
}

pub fn setup_view_harness_with_bank(
    view: ViewKind,
    identity: Identity,
    bank: Arc<dyn QuestionBank>,
) -> ViewHarness {
    setup_view_harness_with_parts(view, identity, bank, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    identity: Identity,
    storage: Storage,
) -> ViewHarness {
    let bank: Arc<dyn QuestionBank> =
        Arc::new(StaticQuestionBank::builtin().expect("builtin bank"));
    setup_view_harness_with_parts(view, identity, bank, storage)
}

fn setup_view_harness_with_parts(
    view: ViewKind,
    identity: Identity,
    bank: Arc<dyn QuestionBank>,
    storage: Storage,
) -> ViewHarness {
    let config = AppServicesConfig {
        clock: Clock::fixed(fixed_now()),
        identity,
        shuffler: Shuffler::Seeded(7),
        ..AppServicesConfig::default()
    };
    let app: Arc<dyn UiApp> = Arc::new(AppServices::from_parts(storage.clone(), bank, config));
    let ctx = build_app_context(&app);

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            ctx: ctx.clone(),
            view,
        },
    );

    ViewHarness { dom, storage, ctx }
}
