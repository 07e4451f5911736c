//! Reception desk page: one call patient card per doctor on the roster and
//! a board of the most recent calls.

use call_patient::components::CallBoardView;
use call_patient::config::DESK_ROOT_ID;
use call_patient::widget::CallPatient;
use call_patient::{read_roster_from_csv_string, CallBoard, CallingPatient, DeskEntry, RecordCall};
use log::{info, warn};
use yew::prelude::*;

/// Wall-clock `HH:MM` for the call board.
fn clock_time_now() -> String {
    let now = js_sys::Date::new_0();
    format!("{:02}:{:02}", now.get_hours(), now.get_minutes())
}

/// Desk component: owns the roster and the call board.
#[function_component(Desk)]
fn desk() -> Html {
    let csv_data = include_str!("roster.csv");
    let roster = use_state(Vec::<DeskEntry>::new);
    let board = use_reducer(CallBoard::default);

    // Load roster from CSV on mount
    {
        let roster = roster.clone();
        use_effect_with((), move |_| match read_roster_from_csv_string(csv_data) {
            Ok(loaded) => roster.set(loaded),
            Err(e) => warn!("{}", e),
        });
    }

    let on_calling = {
        let board = board.dispatcher();
        Callback::from(move |call: CallingPatient| {
            info!("Next patient for {}", call.doctor);
            board.dispatch(RecordCall {
                call,
                at: clock_time_now(),
            });
        })
    };

    html! {
        <div class="Desk">
            <div class="Desk__Cards">
                { roster.iter().map(|entry| html! {
                    <CallPatient
                        key={entry.doctor.clone()}
                        doctor={entry.doctor.clone()}
                        timer={entry.timer_seconds.to_string()}
                        on_calling={on_calling.clone()}
                    />
                }).collect::<Html>() }
            </div>
            <CallBoardView entries={board.entries.clone()} />
        </div>
    }
}

/// Entry point: mounts the desk into `#desk`, or the body when it is missing.
fn main() {
    console_error_panic_hook::set_once();

    match gloo_utils::document().get_element_by_id(DESK_ROOT_ID) {
        Some(root) => {
            yew::Renderer::<Desk>::with_root(root).render();
        }
        None => {
            yew::Renderer::<Desk>::new().render();
        }
    }
}
