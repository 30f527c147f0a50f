//! One-shot flash messages carried in a signed cookie
//!
//! The cookie value is `<payload>.<mac>`, both base64url without padding:
//! - payload: JSON array of messages
//! - mac: HMAC-SHA256 of the encoded payload, keyed by `SECRET_KEY`
//!
//! Cookies that fail verification are ignored.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "formstore_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

/// Signs and verifies flash cookies
#[derive(Clone)]
pub struct FlashSigner {
    key: Vec<u8>,
}

impl FlashSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts any key length")
    }

    /// Encode messages into a signed cookie value.
    pub fn encode(&self, flashes: &[Flash]) -> Result<String, serde_json::Error> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(flashes)?);

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }

    /// Decode a cookie value, returning `None` if it is malformed or forged.
    pub fn decode(&self, value: &str) -> Option<Vec<Flash>> {
        let (payload, signature) = value.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Messages from the request's flash cookie, if any verify.
    pub fn read(&self, headers: &HeaderMap) -> Option<Vec<Flash>> {
        let value = cookie_value(headers, FLASH_COOKIE)?;
        let flashes = self.decode(value);
        if flashes.is_none() {
            tracing::warn!("ignoring flash cookie with invalid signature");
        }
        flashes
    }

    /// `Set-Cookie` header value carrying `flashes`.
    pub fn set_cookie(&self, flashes: &[Flash]) -> Option<HeaderValue> {
        let value = match self.encode(flashes) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode flash messages");
                return None;
            }
        };
        HeaderValue::from_str(&format!(
            "{FLASH_COOKIE}={value}; Path=/; HttpOnly; SameSite=Lax"
        ))
        .ok()
    }
}

/// `Set-Cookie` header value that expires the flash cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("formstore_flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Look up a cookie by name across all `Cookie` headers.
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
