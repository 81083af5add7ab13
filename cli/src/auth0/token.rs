use std::fmt::{Debug, Formatter};
use log::{info, warn};
use reqwest::blocking::Client;
use crate::auth0::config::Config;
use crate::auth0::http_interface;
use crate::error::Error;

/// A management API access token. Never cached; each run asks for a new one.
pub struct Token {
	access: String,
}

impl Token {
	pub fn fetch(client: &Client, config: &Config) -> Result<Token, Error> {
		let body = (&config.client_credentials).into();
		let res = http_interface::oauth::token::post(client, &config.base_url, &body)?;

		if !res.token_type.eq_ignore_ascii_case("bearer") {
			warn!("token endpoint returned token type {:?}, using it as a bearer token anyway", res.token_type);
		}

		info!("fetched access token for client {}", config.client_credentials.id);

		Ok(Token { access: res.access_token })
	}

	pub fn access_token(&self) -> &str {
		&self.access
	}
}

impl Debug for Token {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("Token(<redacted>)")
	}
}
