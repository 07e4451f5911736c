use crate::components::{QueueCard, QueueConfig};
use crate::hooks::{use_calling_notifier, use_tick_interval};
use crate::utils::normalize_seconds_input;
use crate::{CallAction, CallingPatient, PatientCall};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CallPatientProps {
    /// Title shown on the card and sent along with every call.
    pub doctor: AttrValue,
    /// Starting value of the seconds input, as an integer string.
    #[prop_or_default]
    pub timer: AttrValue,
    /// Fired once each time a countdown runs out.
    #[prop_or_default]
    pub on_calling: Callback<CallingPatient>,
    /// Also dispatch the `calling-patient` event on `window`.
    #[prop_or_default]
    pub broadcast: bool,
}

/// Countdown card that calls the next patient for one doctor.
#[function_component(CallPatient)]
pub fn call_patient(props: &CallPatientProps) -> Html {
    let state = {
        let doctor = props.doctor.clone();
        let timer = props.timer.clone();
        use_reducer(move || PatientCall::new(doctor, timer))
    };

    // Attribute changes rewrite both the title and the input, like a fresh render
    {
        let dispatcher = state.dispatcher();
        use_effect_with(
            (props.doctor.clone(), props.timer.clone()),
            move |(doctor, timer)| {
                dispatcher.dispatch(CallAction::Attributes {
                    doctor: doctor.clone(),
                    timer: timer.clone(),
                });
            },
        );
    }

    let on_tick = {
        let dispatcher = state.dispatcher();
        Callback::from(move |session: u64| dispatcher.dispatch(CallAction::Tick(session)))
    };
    use_tick_interval(state.session(), on_tick);

    use_calling_notifier(
        state.calls,
        state.last_call.clone(),
        props.on_calling.clone(),
        props.broadcast,
    );

    let on_call = {
        let dispatcher = state.dispatcher();
        let disabled = state.call_disabled;
        Callback::from(move |_: MouseEvent| {
            if !disabled {
                dispatcher.dispatch(CallAction::Start);
            }
        })
    };

    let on_cancel = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(CallAction::Stop))
    };

    let on_seconds_input = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let normalized = normalize_seconds_input(&input.value()).to_string();
            // Write back directly: the vdom skips the update when the clamped
            // value equals the previous one.
            if input.value() != normalized {
                input.set_value(&normalized);
            }
            dispatcher.dispatch(CallAction::Input(normalized));
        })
    };

    html! {
        <div class="CallPatient">
            <QueueCard
                title={props.doctor.clone()}
                visual={state.visual}
                display={AttrValue::from(state.display.clone())}
                call_label={state.call_label}
                call_disabled={state.call_disabled}
                on_call={on_call}
                on_cancel={on_cancel}
            />
            <QueueConfig
                value={AttrValue::from(state.seconds_input.clone())}
                oninput={on_seconds_input}
            />
        </div>
    }
}
