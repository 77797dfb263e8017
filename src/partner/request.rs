//! Request building and HTTP transport for the partner web API.
//!
//! This module provides the [`PartnerRequest`] struct, which turns an endpoint
//! name and an ordered parameter list into a request URL, sends it through a
//! [`Transport`] and deserializes the JSON body.

use std::time::Duration;

use log::{debug, info};
use mockall::automock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::partner::error::PartnerError;
use crate::partner::parameter::Parameter;

/// How parameter values are written into the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueEncoding {
    /// Values are written verbatim. Callers must escape `&`, `=` and non-ASCII themselves.
    #[default]
    Raw,
    /// Values are percent-encoded.
    Percent,
}

/// Builds the request URL for `endpoint_name`.
///
/// The URL has the form `{base_url}/{endpoint_name}/?name=value&...`. A single
/// trailing slash on `base_url` is dropped so the endpoint is never preceded
/// by `//`. The query string is omitted when `parameters` is empty, and
/// parameters keep the order in which they were given.
///
/// # Errors
///
/// Returns [`PartnerError::Precondition`] if `endpoint_name` is empty.
///
/// # Examples
///
/// ```
/// use steam_partner::partner::{Parameter, ValueEncoding, build_request_command};
///
/// let url = build_request_command(
///     "http://partner.steam-api.com/",
///     "ISteamUserStats/SetUserStatsForGame/v1",
///     &[Parameter::new("appid", "480")],
///     ValueEncoding::Raw,
/// )
/// .unwrap();
/// assert_eq!(
///     url,
///     "http://partner.steam-api.com/ISteamUserStats/SetUserStatsForGame/v1/?appid=480"
/// );
/// ```
pub fn build_request_command(
    base_url: &str,
    endpoint_name: &str,
    parameters: &[Parameter],
    encoding: ValueEncoding,
) -> Result<String, PartnerError> {
    if endpoint_name.is_empty() {
        return Err(PartnerError::Precondition(
            "endpoint name must not be empty".to_owned(),
        ));
    }

    let base_url = base_url.strip_suffix('/').unwrap_or(base_url);
    let mut command = format!("{}/{}/", base_url, endpoint_name);

    if !parameters.is_empty() {
        let query = parameters
            .iter()
            .map(|parameter| match encoding {
                ValueEncoding::Raw => parameter.to_string(),
                ValueEncoding::Percent => format!(
                    "{}={}",
                    parameter.name,
                    urlencoding::encode(&parameter.value)
                ),
            })
            .collect::<Vec<_>>()
            .join("&");
        command.push('?');
        command.push_str(&query);
    }

    Ok(command)
}

/// Removes every `\n` and `\t` from a response body. Spaces are kept.
pub fn strip_control_characters(body: &str) -> String {
    body.chars().filter(|c| *c != '\n' && *c != '\t').collect()
}

/// Executes GET requests and returns the response body.
///
/// This trait abstracts the HTTP round trip for easier testing with mocks.
#[automock]
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Fetches `url` and returns its body with tabs and newlines removed.
    async fn get(&self, url: &str) -> Result<String, PartnerError>;
}

/// [`Transport`] backed by `reqwest`.
///
/// When no client is supplied, a fresh [`Client`] is created for every call.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    /// Reusable HTTP client
    client: Option<Client>,
    /// Per-request timeout, the client default when `None`
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a new [HttpTransport].
    ///
    /// # Arguments
    ///
    /// * `client` - A reusable client, or `None` to create one per request.
    /// * `timeout` - Optional timeout applied to each request.
    pub fn new(client: Option<Client>, timeout: Option<Duration>) -> Self {
        HttpTransport { client, timeout }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, PartnerError> {
        let client = match &self.client {
            Some(client) => client.clone(),
            None => Client::new(),
        };

        let mut request = client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let body = request.send().await?.error_for_status()?.text().await?;
        debug!("response from {} -> {} bytes", url, body.len());

        Ok(strip_control_characters(&body))
    }
}

/// A request sender bound to one partner web API base URL.
///
/// # Examples
///
/// ```no_run
/// use steam_partner::partner::{HttpTransport, PartnerRequest, ValueEncoding};
///
/// # async fn example() -> Result<(), steam_partner::partner::PartnerError> {
/// let request = PartnerRequest::new(
///     "http://partner.steam-api.com/",
///     ValueEncoding::Raw,
///     HttpTransport::default(),
/// )?;
/// let body: serde_json::Value = request.send_partner_request("ISteamUserStats/SetUserStatsForGame/v1", &[]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PartnerRequest<T: Transport> {
    /// Partner web API base URL
    base_url: String,
    /// Query string value encoding
    encoding: ValueEncoding,
    /// HTTP round trip
    transport: T,
}

impl<T: Transport> PartnerRequest<T> {
    /// Create a new [PartnerRequest].
    ///
    /// # Arguments
    ///
    /// * `base_url` - The partner web API base URL.
    /// * `encoding` - How parameter values are written into the query string.
    /// * `transport` - The transport executing the GET requests.
    ///
    /// # Errors
    ///
    /// Returns [`PartnerError::Configuration`] if `base_url` is empty.
    pub fn new(base_url: &str, encoding: ValueEncoding, transport: T) -> Result<Self, PartnerError> {
        if base_url.is_empty() {
            return Err(PartnerError::Configuration(
                "partner base url must not be empty".to_owned(),
            ));
        }

        Ok(PartnerRequest {
            base_url: base_url.to_owned(),
            encoding,
            transport,
        })
    }

    /// Builds the request URL for `endpoint_name`, see [`build_request_command`].
    pub fn build_request_command(
        &self,
        endpoint_name: &str,
        parameters: &[Parameter],
    ) -> Result<String, PartnerError> {
        build_request_command(&self.base_url, endpoint_name, parameters, self.encoding)
    }

    /// Sends a GET to `endpoint_name` and deserializes the body into `R`.
    ///
    /// # Errors
    ///
    /// * [`PartnerError::Precondition`] if `endpoint_name` is empty.
    /// * [`PartnerError::Transport`] if the request fails.
    /// * [`PartnerError::Parse`] if the body does not deserialize into `R`.
    pub async fn send_partner_request<R: DeserializeOwned>(
        &self,
        endpoint_name: &str,
        parameters: &[Parameter],
    ) -> Result<R, PartnerError> {
        let command = self.build_request_command(endpoint_name, parameters)?;
        info!("request {}", endpoint_name);
        debug!("request {}", &command);

        let response = self.transport.get(&command).await?;
        let deserialized: R = serde_json::from_str(&response)?;

        Ok(deserialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "ISteamUserStats/SetUserStatsForGame/v1";

    #[test]
    fn test_build_without_parameters() {
        let url = build_request_command(
            "http://partner.steam-api.com",
            "SetUserStatsForGame",
            &[],
            ValueEncoding::Raw,
        )
        .unwrap();
        assert_eq!(url, "http://partner.steam-api.com/SetUserStatsForGame/");
    }

    #[test]
    fn test_build_strips_one_trailing_slash() {
        let url = build_request_command(
            "http://partner.steam-api.com/",
            "SetUserStatsForGame",
            &[],
            ValueEncoding::Raw,
        )
        .unwrap();
        assert_eq!(url, "http://partner.steam-api.com/SetUserStatsForGame/");
        assert!(!url.contains(".com//"));
    }

    #[test]
    fn test_build_strips_only_one_trailing_slash() {
        let url = build_request_command("http://host//", "x", &[], ValueEncoding::Raw).unwrap();
        assert_eq!(url, "http://host//x/");
    }

    #[test]
    fn test_build_keeps_parameter_order() {
        let parameters = vec![Parameter::new("a", "1"), Parameter::new("b", "2")];
        let url =
            build_request_command("http://host", "endpoint", &parameters, ValueEncoding::Raw)
                .unwrap();
        assert_eq!(url, "http://host/endpoint/?a=1&b=2");

        let reversed = vec![Parameter::new("b", "2"), Parameter::new("a", "1")];
        let url =
            build_request_command("http://host", "endpoint", &reversed, ValueEncoding::Raw)
                .unwrap();
        assert_eq!(url, "http://host/endpoint/?b=2&a=1");
    }

    #[test]
    fn test_build_raw_values_are_not_escaped() {
        let parameters = vec![Parameter::new("name[0]", "a&b=c")];
        let url =
            build_request_command("http://host", "endpoint", &parameters, ValueEncoding::Raw)
                .unwrap();
        assert_eq!(url, "http://host/endpoint/?name[0]=a&b=c");
    }

    #[test]
    fn test_build_percent_encodes_values() {
        let parameters = vec![
            Parameter::new("name[0]", "a&b=c d"),
            Parameter::new("name[1]", "é"),
        ];
        let url =
            build_request_command("http://host", "endpoint", &parameters, ValueEncoding::Percent)
                .unwrap();
        assert_eq!(
            url,
            "http://host/endpoint/?name[0]=a%26b%3Dc%20d&name[1]=%C3%A9"
        );
    }

    #[test]
    fn test_build_rejects_empty_endpoint() {
        let err = build_request_command("http://host", "", &[], ValueEncoding::Raw).unwrap_err();
        assert!(matches!(err, PartnerError::Precondition(_)));
    }

    #[test]
    fn test_strip_control_characters() {
        assert_eq!(
            strip_control_characters("{\n\t\"a\": \"b c\"\n}"),
            "{\"a\": \"b c\"}"
        );
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        let err = PartnerRequest::new("", ValueEncoding::Raw, MockTransport::new()).unwrap_err();
        assert!(matches!(err, PartnerError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_send_partner_request_with_mock_transport() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url| url == "http://host/ISteamUserStats/SetUserStatsForGame/v1/?appid=480")
            .times(1)
            .returning(|_| Ok(r#"{"answer": 42}"#.to_owned()));

        let request = PartnerRequest::new("http://host/", ValueEncoding::Raw, transport).unwrap();
        let body: serde_json::Value = request
            .send_partner_request(ENDPOINT, &[Parameter::new("appid", "480")])
            .await
            .unwrap();

        assert_eq!(body["answer"], 42);
    }

    #[tokio::test]
    async fn test_send_partner_request_parse_error() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_| Ok("<html>oops</html>".to_owned()));

        let request = PartnerRequest::new("http://host", ValueEncoding::Raw, transport).unwrap();
        let err = request
            .send_partner_request::<serde_json::Value>(ENDPOINT, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, PartnerError::Parse(_)));
    }

    #[tokio::test]
    async fn test_http_transport_strips_newlines_and_tabs() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/ISteamUserStats/SetUserStatsForGame/v1/")
            .match_query(mockito::Matcher::UrlEncoded(
                "appid".to_owned(),
                "480".to_owned(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{\n\t\"Data\": {\n\t\t\"result\": 1\n\t}\n}")
            .create_async()
            .await;

        let transport = HttpTransport::new(Some(Client::new()), None);
        let body = transport
            .get(&format!("{}/{}/?appid=480", url, ENDPOINT))
            .await
            .unwrap();

        assert_eq!(body, "{\"Data\": {\"result\": 1}}");
    }

    #[tokio::test]
    async fn test_http_transport_without_client() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/endpoint/")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let transport = HttpTransport::default();
        let body = transport.get(&format!("{}/endpoint/", url)).await.unwrap();

        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_http_transport_timeout() {
        // Accepts the connection and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let transport = HttpTransport::new(None, Some(Duration::from_millis(50)));
        let err = transport
            .get(&format!("http://{}/endpoint/", addr))
            .await
            .unwrap_err();

        match err {
            PartnerError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_transport_error_status() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/endpoint/")
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let transport = HttpTransport::new(None, Some(Duration::from_secs(5)));
        let err = transport
            .get(&format!("{}/endpoint/", url))
            .await
            .unwrap_err();

        assert!(matches!(err, PartnerError::Transport(_)));
    }
}
