use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Position;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Asks the browser for the current position. The permission prompt, if
/// any, is the browser's own.
pub async fn current_coordinates() -> Result<Coordinates, String> {
    let geolocation = web_sys::window()
        .ok_or("No window")?
        .navigator()
        .geolocation()
        .map_err(|_| "Geolocation is not supported by your browser".to_string())?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        if let Err(err) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject)) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });
    let position = JsFuture::from(promise)
        .await
        .map_err(|err| position_error_message(&err))?
        .dyn_into::<Position>()
        .map_err(|_| "Unexpected geolocation result".to_string())?;

    let coords = position.coords();
    Ok(Coordinates {
        latitude: coords.latitude(),
        longitude: coords.longitude(),
    })
}

fn position_error_message(err: &JsValue) -> String {
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "Unable to retrieve your location".to_string())
}
