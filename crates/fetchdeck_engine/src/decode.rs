use fetchdeck_core::FetchError;
use fetchdeck_logging::deck_warn;
use serde::de::DeserializeOwned;
use url::Url;

use crate::RawResponse;

/// Validate a raw response and decode its JSON body into `T`.
///
/// Checks run in order: status present, status 2xx, body non-empty, body
/// matches `T`. The serde error is logged and replaced by `DecodingError`.
pub fn decode_response<T: DeserializeOwned>(
    url: &Url,
    response: RawResponse,
) -> Result<T, FetchError> {
    let status = response.status.ok_or(FetchError::Unknown)?;
    if !(200..300).contains(&status) {
        return Err(FetchError::ServerError(status));
    }
    if response.body.is_empty() {
        return Err(FetchError::NoData);
    }
    serde_json::from_slice(&response.body).map_err(|err| {
        deck_warn!(
            "Decoding {} as {} failed: {}",
            url,
            std::any::type_name::<T>(),
            err
        );
        FetchError::DecodingError
    })
}
