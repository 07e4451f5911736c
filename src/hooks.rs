use crate::config::TICK_INTERVAL_MS;
use crate::interop::broadcast_calling_patient;
use crate::CallingPatient;
use gloo_timers::callback::Interval;
use log::{debug, warn};
use yew::prelude::*;

/// Run a one-second interval for as long as `session` is `Some`.
///
/// The interval is owned by the effect, so it is dropped (and cancelled)
/// whenever the session ends, a new session replaces it, or the component
/// unmounts. Each tick emits the session id it was started for.
#[hook]
pub fn use_tick_interval(session: Option<u64>, on_tick: Callback<u64>) {
    use_effect_with(session, move |session| {
        let interval = (*session).map(|id| {
            debug!("Starting tick interval for session {}", id);
            Interval::new(TICK_INTERVAL_MS, move || on_tick.emit(id))
        });

        move || drop(interval)
    });
}

/// Hand every expired countdown to the host exactly once.
///
/// `calls` only grows when a countdown expires, so keying the effect on it
/// fires once per expiry and never on the initial render.
#[hook]
pub fn use_calling_notifier(
    calls: u64,
    last_call: Option<CallingPatient>,
    on_calling: Callback<CallingPatient>,
    broadcast: bool,
) {
    use_effect_with(calls, move |&calls| {
        if calls == 0 {
            return;
        }
        let Some(call) = last_call else {
            return;
        };

        if broadcast {
            if let Err(e) = broadcast_calling_patient(&call) {
                warn!("Failed to broadcast call for {}: {:?}", call.doctor, e);
            }
        }
        on_calling.emit(call);
    });
}
