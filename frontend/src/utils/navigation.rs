use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const LOGIN_PATH: &str = "/login";

/// Characters left readable in a `redirect` query value.
const REDIRECT_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Full page navigation, the same way a link click would.
pub fn go_to(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(path) {
            log::warn!("Failed to navigate to {}: {:?}", path, err);
        }
    }
}

pub fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

pub fn current_search() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

pub fn login_redirect_url(path: &str) -> String {
    format!(
        "{}?redirect={}",
        LOGIN_PATH,
        utf8_percent_encode(path, REDIRECT_VALUE)
    )
}

/// Where to go after signing in, taken from a `?redirect=` query string.
///
/// Only same-site absolute paths are honoured; anything else lands on `/`.
/// Browsers read `\` as `/`, so any backslash is refused.
pub fn redirect_target(search: &str) -> String {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "redirect")
        .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok())
        .map(|value| value.into_owned())
        .filter(|value| {
            value.starts_with('/') && !value.starts_with("//") && !value.contains('\\')
        })
        .unwrap_or_else(|| "/".to_string())
}
