//! JavaScript bridge for the browser UI
//!
//! The page's controls talk to the scene through CustomEvents on the window
//! object, carrying JSON in `detail`. Incoming messages are queued and
//! drained by a Bevy system each frame.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use painting::ExportTarget;
use tagmaster_ipc::{BevyToUi, UiToBevy};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Event the page dispatches with UI commands
pub const UI_TO_BEVY_EVENT: &str = "tagmaster:ui-to-bevy";
/// Event the scene dispatches back to the page
pub const BEVY_TO_UI_EVENT: &str = "tagmaster:bevy-to-ui";

thread_local! {
    /// Queue of messages received from the UI
    static MESSAGE_QUEUE: RefCell<VecDeque<UiToBevy>> = RefCell::new(VecDeque::new());

    /// Whether leaving the page would lose paint
    static HAS_PAINT: Cell<bool> = const { Cell::new(false) };
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn log_error(context: &str, err: impl std::fmt::Debug) {
    web_sys::console::error_1(&format!("{}: {:?}", context, err).into());
}

/// Register the UI event listener and the unload guard
pub fn init_bridge() -> Result<(), JsValue> {
    let window = window()?;

    let on_message = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(detail) = event.detail().as_string() else {
            return;
        };
        match UiToBevy::from_json(&detail) {
            Ok(msg) => MESSAGE_QUEUE.with(|queue| queue.borrow_mut().push_back(msg)),
            Err(e) => log_error("Failed to parse UI message", e),
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback(UI_TO_BEVY_EVENT, on_message.as_ref().unchecked_ref())?;
    on_message.forget();

    // Ask before leaving once anything has been painted
    let on_unload = Closure::wrap(Box::new(move |event: web_sys::BeforeUnloadEvent| {
        if HAS_PAINT.with(Cell::get) {
            event.prevent_default();
            event.set_return_value("Your artwork has not been saved.");
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())?;
    on_unload.forget();

    web_sys::console::log_1(&"TagMaster WASM bridge initialized".into());
    Ok(())
}

/// Poll for the next message from the UI (non-blocking)
pub fn poll_ui_message() -> Option<UiToBevy> {
    MESSAGE_QUEUE.with(|queue| queue.borrow_mut().pop_front())
}

pub fn set_has_paint(has_paint: bool) {
    HAS_PAINT.with(|flag| flag.set(has_paint));
}

/// Send a message to the UI
pub fn send_to_ui(msg: &BevyToUi) -> Result<(), JsValue> {
    let json = msg
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&json));
    let event = web_sys::CustomEvent::new_with_event_init_dict(BEVY_TO_UI_EVENT, &init)?;
    window()?.dispatch_event(&event)?;
    Ok(())
}

/// Hand a PNG to the user: a download on desktop, a new tab on mobile
/// browsers that ignore the download attribute
pub fn deliver_artwork(filename: &str, png: &[u8]) -> Result<ExportTarget, JsValue> {
    let window = window()?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(png));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let user_agent = window.navigator().user_agent().unwrap_or_default();
    let target = ExportTarget::for_user_agent(&user_agent);

    match target {
        ExportTarget::Download => {
            let document = window
                .document()
                .ok_or_else(|| JsValue::from_str("no document"))?;
            let anchor: web_sys::HtmlAnchorElement =
                document.create_element("a")?.dyn_into()?;
            anchor.set_href(&url);
            anchor.set_download(filename);
            anchor.click();
            web_sys::Url::revoke_object_url(&url)?;
        }
        // The new tab still needs the URL, so it is not revoked
        ExportTarget::OpenInTab => {
            window.open_with_url_and_target(&url, "_blank")?;
        }
    }

    Ok(target)
}
