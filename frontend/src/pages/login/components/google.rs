use leptos::*;

/// Global the Google Identity Services script calls with the credential.
pub const CREDENTIAL_CALLBACK: &str = "happypetsGoogleCredential";

/// Google sign-in button rendered by the GIS script from its `data-*`
/// attributes. `on_credential` receives the ID token.
#[component]
pub fn GoogleSignIn(client_id: String, on_credential: Callback<String>) -> impl IntoView {
    #[cfg(target_arch = "wasm32")]
    {
        let registration = register_callback(on_credential);
        on_cleanup(move || drop(registration));
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = on_credential;

    view! {
        <div
            id="g_id_onload"
            data-client_id=client_id
            data-callback=CREDENTIAL_CALLBACK
            data-auto_prompt="false"
        ></div>
        <div class="g_id_signin flex justify-center" data-type="standard" data-text="signin_with"></div>
    }
}

#[cfg(target_arch = "wasm32")]
struct CallbackRegistration {
    _closure: wasm_bindgen::closure::Closure<dyn Fn(wasm_bindgen::JsValue)>,
}

#[cfg(target_arch = "wasm32")]
impl Drop for CallbackRegistration {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = js_sys::Reflect::delete_property(&window, &CREDENTIAL_CALLBACK.into());
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn register_callback(on_credential: Callback<String>) -> Option<CallbackRegistration> {
    use wasm_bindgen::{closure::Closure, JsValue};

    let window = web_sys::window()?;
    let closure = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        match js_sys::Reflect::get(&response, &"credential".into())
            .ok()
            .and_then(|credential| credential.as_string())
        {
            Some(credential) => on_credential.call(credential),
            None => log::warn!("Google sign-in returned no credential"),
        }
    });
    js_sys::Reflect::set(&window, &CREDENTIAL_CALLBACK.into(), closure.as_ref()).ok()?;
    Some(CallbackRegistration { _closure: closure })
}
