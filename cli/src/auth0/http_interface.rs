use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::Serialize;
use crate::error::Error;

pub fn build_url(base_url: &Url, segments: &[&str]) -> Result<Url, Error> {
	let mut url = base_url.clone();

	{
		let mut path_segments = url.path_segments_mut()
			.map_err(|_| Error::Config(format!("{base_url} cannot be used as a base url")))?;

		path_segments.pop_if_empty();
		for segment in segments {
			path_segments.push(segment);
		}
	}

	Ok(url)
}

/// POSTs `body` as JSON and returns the raw response body of a successful call.
fn post<Req: Serialize>(client: &Client, url: Url, body: &Req, token: Option<&str>) -> Result<Vec<u8>, Error> {
	let endpoint = url.path().to_string();

	let req = {
		let mut builder = client.post(url)
			.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
			.json(body);

		if let Some(token) = token {
			builder = builder.bearer_auth(token);
		}

		builder.build()?
	};

	debug!("POST {}", req.url());

	let res = client.execute(req)?;
	let status = res.status();
	debug!("{endpoint} responded {status}");

	let body = res.bytes()?.to_vec();

	if !status.is_success() {
		let body = String::from_utf8_lossy(&body).into_owned();
		return Err(Error::Status { endpoint, status, body });
	}

	Ok(body)
}

pub mod oauth {
	pub mod token {
		use reqwest::blocking::Client;
		use reqwest::Url;
		use serde::{Deserialize, Serialize};
		use crate::auth0::client_credentials::ClientCredentials;
		use crate::auth0::http_interface;
		use crate::error::Error;

		pub const GRANT_TYPE: &str = "client_credentials";

		#[derive(Serialize)]
		pub struct PostRequestBody<'a> {
			pub client_id: &'a str,
			pub client_secret: &'a str,
			pub grant_type: &'a str,
		}

		impl<'a> From<&'a ClientCredentials> for PostRequestBody<'a> {
			fn from(client_credentials: &'a ClientCredentials) -> Self {
				PostRequestBody {
					client_id: &client_credentials.id,
					client_secret: &client_credentials.secret,
					grant_type: GRANT_TYPE,
				}
			}
		}

		#[derive(Deserialize)]
		pub struct PostResponseBody {
			pub access_token: String,
			pub token_type: String,
		}

		pub fn post(client: &Client, base_url: &Url, body: &PostRequestBody) -> Result<PostResponseBody, Error> {
			let url = http_interface::build_url(base_url, &["oauth", "token"])?;
			let raw = http_interface::post(client, url, body, None)?;

			Ok(serde_json::from_slice(&raw)?)
		}
	}
}

pub mod users {
	pub mod impersonate {
		use reqwest::blocking::Client;
		use reqwest::Url;
		use serde::Serialize;
		use crate::auth0::http_interface;
		use crate::error::Error;

		pub const PROTOCOL: &str = "oauth2";
		pub const RESPONSE_TYPE: &str = "token";

		#[derive(Debug, Serialize)]
		pub struct PostRequestBody<'a> {
			pub protocol: &'a str,
			pub impersonator_id: &'a str,
			pub client_id: &'a str,
			#[serde(rename = "additionalParameters")]
			pub additional_parameters: AdditionalParameters<'a>,
		}

		#[derive(Debug, Serialize)]
		pub struct AdditionalParameters<'a> {
			pub response_type: &'a str,
			pub scope: &'a str,
		}

		/// The body is the link itself, so its bytes are handed back untouched.
		pub fn post(client: &Client, base_url: &Url, token: &str, user_id: &str, body: &PostRequestBody) -> Result<Vec<u8>, Error> {
			let url = http_interface::build_url(base_url, &["users", user_id, "impersonate"])?;
			http_interface::post(client, url, body, Some(token))
		}
	}
}
