use log::info;
use reqwest::blocking::Client;
use crate::auth0::config::Config;
use crate::auth0::http_interface;
use crate::auth0::http_interface::users::impersonate::{AdditionalParameters, PostRequestBody, PROTOCOL, RESPONSE_TYPE};
use crate::auth0::token::Token;
use crate::error::Error;

/// Whatever the tenant answered with. It is not checked to be a well-formed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpersonationLink(Vec<u8>);

impl ImpersonationLink {
	pub fn fetch(client: &Client, config: &Config, user_id: &str, token: &Token) -> Result<ImpersonationLink, Error> {
		let body = PostRequestBody {
			protocol: PROTOCOL,
			impersonator_id: &config.impersonator_id,
			client_id: &config.app_client_id,
			additional_parameters: AdditionalParameters {
				response_type: RESPONSE_TYPE,
				scope: &config.scope,
			},
		};

		let link = http_interface::users::impersonate::post(client, &config.base_url, token.access_token(), user_id, &body)?;
		info!("fetched impersonation link for {user_id}");

		Ok(ImpersonationLink(link))
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}
