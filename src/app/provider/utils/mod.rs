use actix_web::client::{ClientRequest, SendRequestError};
use actix_web::HttpMessage;
use futures::future::{err as fut_err, Either};
use futures::Future;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Fail)]
pub enum RequestError {
    #[fail(display = "Request error: {}", reason)]
    UnknownError {
        reason: String,
    },

    #[fail(display = "Request time out")]
    ProviderTimeOut {},

    #[fail(display = "HTTP error! status: {}", status)]
    BadStatus {
        status: u16,
    },

    #[fail(display = "Invalid response: {}", reason)]
    InvalidResponse {
        reason: String,
    },
}

/// Any non-2xx status is an error, whatever the body says.
pub fn fetch_json_request<T: 'static>(request: ClientRequest, timeout: Duration) -> Box<dyn Future<Item=T, Error=RequestError>>
    where T: DeserializeOwned
{
    Box::new(
        request
            .send()
            .timeout(timeout)
            .map_err(|e| match e {
                SendRequestError::Timeout => RequestError::ProviderTimeOut {},
                e => RequestError::UnknownError { reason: e.to_string() },
            })
            .and_then(|response| {
                let status = response.status();
                if !status.is_success() {
                    return Either::A(fut_err(RequestError::BadStatus { status: status.as_u16() }));
                }

                Either::B(
                    response
                        .body()
                        .map_err(|e| RequestError::UnknownError { reason: e.to_string() })
                        .and_then(|body| {
                            serde_json::from_slice::<T>(&body)
                                .map_err(|e| RequestError::InvalidResponse { reason: e.to_string() })
                        })
                )
            })
    )
}
