//! Stateless views for the call patient card.
//!
//! These render from props only; all state lives in [`crate::PatientCall`].

use crate::config::{
    CANCEL_LABEL, INFO_ANIMATION_CLASS, INFO_DISABLED_CLASS, MAX_TIMER_SECONDS,
    MIN_TIMER_SECONDS, NEXT_PATIENT_LABEL, SECONDS_INPUT_LABEL, SECONDS_INPUT_TITLE,
};
use crate::{BoardEntry, CallLabel, VisualState};
use std::collections::VecDeque;
use yew::prelude::*;

/// The dark card: doctor title, "Next Patient", timer and the two buttons.
#[derive(Properties, PartialEq)]
pub struct QueueCardProps {
    pub title: AttrValue,
    pub visual: VisualState,
    pub display: AttrValue,
    pub call_label: CallLabel,
    pub call_disabled: bool,
    pub on_call: Callback<MouseEvent>,
    pub on_cancel: Callback<MouseEvent>,
}

#[function_component(QueueCard)]
pub fn queue_card(props: &QueueCardProps) -> Html {
    let visual = props.visual;

    let next_patient_class = classes!(
        "CardQueue__Info",
        "CardQueue__Info--big",
        visual.next_patient_dimmed().then_some(INFO_DISABLED_CLASS),
        visual.next_patient_pulsing().then_some(INFO_ANIMATION_CLASS),
    );
    let timer_class = classes!(
        "CardQueue__Info",
        visual.timer_dimmed().then_some(INFO_DISABLED_CLASS),
    );

    html! {
        <div class="CardQueue">
            <h5 class="CardQueue__Title UMarginBottomDefault">{ props.title.clone() }</h5>

            <div class="CardQueue__Content">
                <div class="CardQueue__Details UMarginBottomDefault">
                    <p class={next_patient_class}>{ NEXT_PATIENT_LABEL }</p>
                    <p class={timer_class} role="timer">{ props.display.clone() }</p>
                </div>
                <div class="CardQueue__Options">
                    <button class="Button Button--outlined"
                        disabled={props.call_disabled}
                        onclick={props.on_call.clone()}>
                        { props.call_label.as_str() }
                    </button>
                    <button class="Button" onclick={props.on_cancel.clone()}>
                        { CANCEL_LABEL }
                    </button>
                </div>
            </div>
        </div>
    }
}

/// The outlined strip under the card holding the seconds input.
#[derive(Properties, PartialEq)]
pub struct QueueConfigProps {
    pub value: AttrValue,
    pub oninput: Callback<InputEvent>,
}

#[function_component(QueueConfig)]
pub fn queue_config(props: &QueueConfigProps) -> Html {
    html! {
        <div class="QueueConfig">
            <p>{ SECONDS_INPUT_LABEL }</p>
            <input class="QueueConfig__Input"
                type="number"
                min={MIN_TIMER_SECONDS.to_string()}
                max={MAX_TIMER_SECONDS.to_string()}
                title={SECONDS_INPUT_TITLE}
                value={props.value.clone()}
                oninput={props.oninput.clone()}
            />
        </div>
    }
}

/// List of the latest calls made from any card on the desk.
#[derive(Properties, PartialEq)]
pub struct CallBoardViewProps {
    pub entries: VecDeque<BoardEntry>,
}

#[function_component(CallBoardView)]
pub fn call_board_view(props: &CallBoardViewProps) -> Html {
    if props.entries.is_empty() {
        return html! {
            <div class="CallBoard">
                <p class="CallBoard__Empty">{ "No patients called yet" }</p>
            </div>
        };
    }

    html! {
        <div class="CallBoard">
            <h3>{ "Now calling" }</h3>
            <ul class="CallBoard__List">
                { props.entries.iter().map(|entry| html! {
                    <li class="CallBoard__Entry">
                        <span class="CallBoard__Time">{ entry.at.clone() }</span>
                        { " " }
                        <span class="CallBoard__Doctor">{ entry.doctor.clone() }</span>
                    </li>
                }).collect::<Html>() }
            </ul>
        </div>
    }
}
