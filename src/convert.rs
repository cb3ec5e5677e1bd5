//! Body conversion: the message-converter seam.
//!
//! [`FromBody`] turns a response body into a typed value. The target type is
//! named with an ordinary generic parameter on
//! [`PartialBinding::consume`](crate::PartialBinding::consume) and
//! [`PartialBinding::map`](crate::PartialBinding::map); no runtime type
//! tokens are involved. [`Json`] opts a `serde`-deserializable type into
//! JSON decoding.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::response::HttpResponse;

/// Decode a typed value from a response body.
pub trait FromBody: Sized {
    /// Decode `Self` from the response.
    fn from_body(response: &HttpResponse) -> Result<Self, Error>;
}

impl FromBody for String {
    fn from_body(response: &HttpResponse) -> Result<Self, Error> {
        response
            .body_str()
            .map(str::to_owned)
            .ok_or_else(|| Error::Decode("response body is not valid UTF-8".into()))
    }
}

impl FromBody for Bytes {
    fn from_body(response: &HttpResponse) -> Result<Self, Error> {
        Ok(response.body().clone())
    }
}

impl FromBody for Vec<u8> {
    fn from_body(response: &HttpResponse) -> Result<Self, Error> {
        Ok(response.body().to_vec())
    }
}

/// Marker for JSON-decoded bodies.
///
/// ```
/// use std::collections::HashMap;
/// use http::StatusCode;
/// use riptide::{FromBody, HttpResponse, Json};
///
/// let response = HttpResponse::new(StatusCode::OK).with_body(r#"{"value": 123}"#);
/// let Json(decoded): Json<HashMap<String, i64>> = Json::from_body(&response).unwrap();
/// assert_eq!(decoded["value"], 123);
/// ```
pub struct Json<T>(pub T);

impl<T: DeserializeOwned> FromBody for Json<T> {
    fn from_body(response: &HttpResponse) -> Result<Self, Error> {
        serde_json::from_slice(response.body())
            .map(Json)
            .map_err(Error::from)
    }
}
