use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use drill_core::model::Problem;
use drill_core::time::fixed_now;
use drill_core::{RandomSource, ScriptedRandom};
use services::{Clock, DrillSettings};

use crate::context::{UiApp, build_app_context};
use crate::views::DrillView;

#[derive(Clone)]
struct TestApp {
    settings: DrillSettings,
    problems: Vec<Problem>,
}

impl UiApp for TestApp {
    fn settings(&self) -> DrillSettings {
        self.settings
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn random_source(&self) -> Box<dyn RandomSource> {
        Box::new(ScriptedRandom::replaying(
            self.settings.operators(),
            &self.problems,
        ))
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn DrillHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { DrillView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
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

pub fn setup_drill_harness(problems: &[Problem]) -> ViewHarness {
    let app = Arc::new(TestApp {
        settings: DrillSettings::default(),
        problems: problems.to_vec(),
    });
    let dom = VirtualDom::new_with_props(DrillHarness, ViewHarnessProps { app });
    ViewHarness { dom }
}
