use dioxus::prelude::*;
use drill_core::model::Outcome;
use tracing::warn;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{DrillIntent, DrillVm};

#[component]
pub fn DrillView() -> Element {
    let ctx = use_context::<AppContext>();
    let settings = ctx.settings();
    let tick_period = settings.tick_period();
    let celebration = settings.celebration();

    let vm = use_signal(|| DrillVm::new(ctx.start_session()));
    let error = use_signal(|| None::<ViewError>);

    use_future(move || async move {
        let mut vm = vm;
        loop {
            tokio::time::sleep(tick_period).await;
            let _ = vm.write().apply(DrillIntent::Tick);
        }
    });

    let dispatch = use_callback(move |intent: DrillIntent| {
        let mut vm = vm;
        let mut error = error;
        let result = vm.write().apply(intent);
        match result {
            Ok(Some(Outcome::Correct)) => {
                error.set(None);
                // Redraw once the celebration window has passed.
                spawn(async move {
                    tokio::time::sleep(celebration).await;
                    let _ = vm.write().apply(DrillIntent::Tick);
                });
            }
            Ok(_) => error.set(None),
            Err(err) => {
                warn!(?err, "drill intent rejected");
                error.set(Some(err));
            }
        }
    });

    let view = vm.read();
    let heading = view.heading();
    let problem_label = view.problem_label();
    let pending = view.pending_input().to_string();
    let timer = view.timer_label();
    let correct = view.correct();
    let wrong = view.wrong();
    let total_label = view.total_label();
    let accuracy = view.accuracy();
    let accuracy_label = view.accuracy_label();
    let celebrating = view.is_celebrating();
    let rows = view.mistake_rows();
    drop(view);

    let no_mistakes = rows.is_empty();
    let mistake_items = rows.into_iter().map(|row| {
        let index = row.index;
        rsx! {
            li { key: "{row.key}", class: row.status.class(),
                button {
                    class: "mistake-button",
                    r#type: "button",
                    onclick: move |_| dispatch.call(DrillIntent::Requeue(index)),
                    span { class: "mistake-task", "{row.task_label}" }
                    span { class: "mistake-given", "{row.given_label}" }
                    span { class: "mistake-status", "{row.status.label()}" }
                }
            }
        }
    });

    rsx! {
        div { class: "page drill-page",
            aside { class: "drill-stats",
                div { class: "drill-stat",
                    span { class: "drill-stat-label", "Time" }
                    span { class: "drill-stat-value drill-timer", "{timer}" }
                }
                div { class: "drill-stat drill-stat--correct",
                    span { class: "drill-stat-label", "Correct" }
                    span { class: "drill-stat-value", "{correct}" }
                }
                div { class: "drill-stat drill-stat--wrong",
                    span { class: "drill-stat-label", "Wrong" }
                    span { class: "drill-stat-value", "{wrong}" }
                }
            }

            section { class: "drill-card",
                header { class: "view-header",
                    h2 { class: "view-title", "Math Drill" }
                    p { class: "view-subtitle", "Addition, subtraction and times tables" }
                }
                if celebrating {
                    div { class: "celebration", role: "status", "Correct!" }
                }
                h3 { class: "drill-heading", "{heading}" }
                p { class: "drill-problem", "{problem_label}" }
                input {
                    class: "drill-input",
                    r#type: "text",
                    placeholder: "Your answer",
                    value: "{pending}",
                    oninput: move |evt| dispatch.call(DrillIntent::Input(evt.value())),
                    onkeydown: move |evt| {
                        if evt.key() == Key::Enter {
                            dispatch.call(DrillIntent::Submit);
                        }
                    },
                }
                div { class: "drill-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(DrillIntent::Submit),
                        "Check"
                    }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| dispatch.call(DrillIntent::Skip),
                        "Next problem"
                    }
                }
                if let Some(err) = error() {
                    p { class: "drill-error", "{err.message()}" }
                }
                div { class: "drill-progress",
                    div { class: "drill-progress-bar",
                        div { class: "drill-progress-fill", style: "width: {accuracy}%" }
                    }
                    div { class: "drill-progress-labels",
                        span { "{total_label}" }
                        span { "{accuracy_label}" }
                    }
                }
            }

            section { class: "drill-mistakes",
                h3 { class: "drill-mistakes-title", "Wrong answers" }
                if no_mistakes {
                    p { class: "drill-mistakes-empty", "No wrong answers yet. Keep going!" }
                } else {
                    ul { class: "drill-mistakes-list", {mistake_items} }
                }
            }
        }
    }
}
