use crate::{
    api::ApiClient,
    session::SessionStore,
    state::profile::save_location_request,
    utils::location::current_coordinates,
};

/// Asks the browser where the user is and records it.
pub async fn save_current_location(api: &ApiClient, store: &SessionStore) -> Result<String, String> {
    let coords = current_coordinates().await?;
    Ok(save_location_request(coords.latitude, coords.longitude, api, store).await)
}
