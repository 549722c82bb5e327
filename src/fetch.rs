//! Blocking HTTP fetch of the endpoint XML.

use std::time::Duration;

use crate::error::FetchError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// One GET against the endpoint; returns the raw body on any 2xx status.
///
/// Transport failures, timeouts, and non-2xx statuses all surface as
/// `FetchError`. No retries.
pub(crate) fn fetch_xml(url: &str) -> Result<Vec<u8>, FetchError> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(HTTP_TIMEOUT))
        .build()
        .into();

    let mut response = agent.get(url).call().map_err(|err| FetchError::Request {
        url: url.to_string(),
        source: Box::new(err),
    })?;

    response
        .body_mut()
        .read_to_vec()
        .map_err(|err| FetchError::Body {
            url: url.to_string(),
            source: Box::new(err),
        })
}
