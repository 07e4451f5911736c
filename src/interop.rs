//! JavaScript-facing entry points.
//!
//! Pages that are not written in Yew can mount a card into any element with
//! `mountCallPatient`, and pages that still listen for the global
//! `calling-patient` event can have expiries re-broadcast on `window`.

use crate::config::CALLING_PATIENT_EVENT;
use crate::widget::{CallPatient, CallPatientProps};
use crate::CallingPatient;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit};
use yew::{AppHandle, Callback};

/// Dispatch `calling-patient` on `window` with the doctor as `detail`.
pub fn broadcast_calling_patient(call: &CallingPatient) -> Result<(), JsValue> {
    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&call.doctor));
    let event = CustomEvent::new_with_event_init_dict(CALLING_PATIENT_EVENT, &init)?;
    gloo_utils::window().dispatch_event(&event)?;
    Ok(())
}

/// Handle to a card mounted from JavaScript.
#[wasm_bindgen]
pub struct MountedCallPatient {
    handle: Option<AppHandle<CallPatient>>,
}

#[wasm_bindgen]
impl MountedCallPatient {
    /// Tear the card down. Any running countdown is cancelled with it.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.destroy();
            info!("Call patient card unmounted");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.handle.is_some()
    }
}

/// Mount a card inside the element with id `element_id`.
///
/// Expiries are always re-broadcast on `window`, since a JavaScript host has
/// no Rust callback to subscribe with.
#[wasm_bindgen(js_name = mountCallPatient)]
pub fn mount_call_patient(
    element_id: &str,
    doctor: String,
    timer: String,
) -> Result<MountedCallPatient, JsValue> {
    console_error_panic_hook::set_once();

    let root = gloo_utils::document()
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("No element with id `{}`", element_id)))?;

    let props = CallPatientProps {
        doctor: doctor.into(),
        timer: timer.into(),
        on_calling: Callback::default(),
        broadcast: true,
    };
    let handle = yew::Renderer::<CallPatient>::with_root_and_props(root, props).render();
    info!("Call patient card mounted into #{}", element_id);

    Ok(MountedCallPatient {
        handle: Some(handle),
    })
}
