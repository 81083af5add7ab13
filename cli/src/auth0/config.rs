use std::time::Duration;
use reqwest::Url;
use crate::Cli;
use crate::auth0::client_credentials::ClientCredentials;
use crate::error::Error;

pub const DEFAULT_ACCOUNT: &str = "apex-inc";
pub const DEFAULT_SCOPE: &str = "openid name user_id nickname email picture";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Everything a run needs, gathered once before the first request is made.
#[derive(Debug)]
pub struct Config {
	pub client_credentials: ClientCredentials,
	pub base_url: Url,
	pub impersonator_id: String,
	pub app_client_id: String,
	pub scope: String,
	pub timeout: Duration,
}

impl Config {
	pub fn load(cli: &Cli) -> Result<Config, Error> {
		let client_credentials = ClientCredentials::from_env()?;

		let base_url = match &cli.base_url {
			Some(base_url) => check_base_url(base_url.clone())?,
			None => account_url(&cli.account)?,
		};

		Ok(Config {
			client_credentials,
			base_url,
			impersonator_id: cli.impersonator_id.clone(),
			app_client_id: cli.client_id.clone(),
			scope: cli.scope.clone(),
			timeout: Duration::from_secs(cli.timeout),
		})
	}
}

/// `https://{account}.auth0.com`, where the account may carry a region (`apex-inc.eu`).
pub fn account_url(account: &str) -> Result<Url, Error> {
	let valid = account.split('.')
		.all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));

	if !valid {
		return Err(Error::Config(format!("invalid account name {account:?}")));
	}

	Url::parse(&format!("https://{account}.auth0.com"))
		.map_err(|err| Error::Config(format!("invalid account name {account:?}: {err}")))
}

fn check_base_url(url: Url) -> Result<Url, Error> {
	match url.scheme() {
		"http" | "https" => Ok(url),
		scheme => Err(Error::Config(format!("unsupported scheme {scheme} in base url {url}"))),
	}
}
