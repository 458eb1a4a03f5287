use crate::domain::User;
use crate::error::ApiError;
use crate::settings::Settings;
use crate::upload::Upload;
use evrent_common::api::{ErrorMessage, HealthCheckResponse, Listing, LoginRequest, Single};
use eyre::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

mod incidents;
mod renter;
mod staff;
mod stations;
mod stats;
mod users;
mod vehicles;

pub use vehicles::VehicleQuery;

#[derive(Debug, serde::Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

async fn handle_response_error(res: Response) -> Result<Response> {
    let status = res.status();
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return Err(ApiError::Unavailable.into());
    }

    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorMessage>(&body)
        .ok()
        .and_then(|x| x.text().map(String::from));
    debug!("request failed with {status}: {body}");

    if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized(message).into())
    } else {
        Err(ApiError::Server { status, message }.into())
    }
}

async fn parse_single<T: DeserializeOwned>(res: Response) -> Result<T> {
    let body = res.text().await?;
    let value = serde_json::from_str::<Single<T>>(&body)
        .wrap_err_with(|| format!("Unexpected response body: {body}"))?;
    Ok(value.into_inner())
}

async fn parse_list<T: DeserializeOwned>(res: Response) -> Result<Vec<T>> {
    let body = res.text().await?;
    let value = serde_json::from_str::<Listing<T>>(&body)
        .wrap_err_with(|| format!("Unexpected response body: {body}"))?;
    Ok(value.into_vec())
}

/// Percent-encodes an id before it is placed in a path.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Resolves an `imageUrl` or `documentUrl` against the asset host. Absolute
/// urls are returned unchanged.
pub fn asset_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub async fn health_check(address: &str) -> Result<HealthCheckResponse> {
    let url = format!("{address}/health");
    let res = reqwest::get(url).await?;
    let res = handle_response_error(res).await?;

    parse_single(res).await
}

pub async fn login(address: &str, email: &str, password: &str) -> Result<LoginResponse> {
    let url = format!("{address}/auth/login");
    let res = reqwest::Client::new()
        .post(url)
        .json(&LoginRequest {
            email: email.into(),
            password: password.into(),
        })
        .send()
        .await?;
    let res = handle_response_error(res).await?;

    parse_single(res).await
}

/// Authenticated client for every endpoint behind the login.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    address: String,
}

impl ApiClient {
    pub fn new(address: &str, session: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = session {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .wrap_err("Session token is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            address: address.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.server_address, settings.session().as_deref())
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.address);
        debug!("{method} {url}");
        self.client.request(method, url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let res = req.send().await?;
        handle_response_error(res).await
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let res = self.send(self.request(Method::GET, path).query(query)).await?;
        parse_list(res).await
    }

    pub(crate) async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let res = self.send(self.request(Method::GET, path)).await?;
        parse_single(res).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let res = self.send(self.request(method, path).json(body)).await?;
        parse_single(res).await
    }

    /// Sends a mutation whose response body is not needed.
    pub(crate) async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let mut req = self.request(method, path);
        if let Some(body) = body {
            req = req.json(body);
        }
        self.send(req).await?;
        Ok(())
    }

    /// Sends the JSON payload as a `data` text part next to the binary parts.
    pub(crate) async fn send_multipart<B, T>(
        &self,
        method: Method,
        path: &str,
        data: &B,
        files: Vec<(&'static str, Upload)>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut form = Form::new().part(
            "data",
            Part::text(serde_json::to_string(data)?).mime_str("application/json")?,
        );
        for (name, upload) in files {
            form = form.part(name, upload.into_part()?);
        }

        let res = self.send(self.request(method, path).multipart(form)).await?;
        parse_single(res).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.send_unit::<()>(Method::POST, "/auth/logout", None).await
    }

    pub async fn me(&self) -> Result<User> {
        self.get_one("/auth/me").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_url_joins_relative_paths() {
        assert_eq!(
            asset_url("http://localhost:8080/", "/uploads/a.png"),
            "http://localhost:8080/uploads/a.png"
        );
        assert_eq!(
            asset_url("http://localhost:8080", "uploads/a.png"),
            "http://localhost:8080/uploads/a.png"
        );
        assert_eq!(
            asset_url("http://localhost:8080", "https://cdn.evrent.vn/a.png"),
            "https://cdn.evrent.vn/a.png"
        );
    }

    #[test]
    fn segment_escapes_reserved_characters() {
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
