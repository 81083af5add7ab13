mod auth0;
mod env;
mod error;

use std::io::{stdout, Write};
use clap::Parser;
use color_eyre::eyre;
use color_eyre::eyre::WrapErr;
use reqwest::blocking::Client;
use reqwest::Url;
use crate::auth0::config::{Config, DEFAULT_ACCOUNT, DEFAULT_SCOPE, DEFAULT_TIMEOUT_SECS};
use crate::auth0::impersonation::ImpersonationLink;
use crate::auth0::token::Token;
use crate::error::Error;

pub static APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Print a link that signs the browser in as <USER_ID>.
///
/// Credentials for the management client are read from AUTH0_CLIENT_ID and
/// AUTH0_CLIENT_SECRET.
#[derive(Debug, Parser)]
#[command(name = "auth0-impersonate", version, about)]
pub struct Cli {
	/// User ID to impersonate
	#[arg(value_name = "USER_ID", value_parser = clap::builder::NonEmptyStringValueParser::new())]
	pub user_id: String,

	/// User ID of impersonator
	#[arg(long, default_value = "")]
	pub impersonator_id: String,

	/// Client ID of the application
	#[arg(long, default_value = "")]
	pub client_id: String,

	/// OAuth scope
	#[arg(long, default_value = DEFAULT_SCOPE)]
	pub scope: String,

	/// Auth0 account (tenant) name, e.g. apex-inc or apex-inc.eu; see --base-url for custom domains
	#[arg(long, default_value = DEFAULT_ACCOUNT)]
	pub account: String,

	/// Use this URL instead of https://<ACCOUNT>.auth0.com
	#[arg(long, value_name = "URL")]
	pub base_url: Option<Url>,

	/// Per-request timeout in seconds
	#[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
	pub timeout: u64,

	/// Log verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,
}

fn main() -> eyre::Result<()> {
	color_eyre::install()?;

	let cli = Cli::parse();
	init_logging(cli.verbose);

	run(&cli, &mut stdout().lock())
		.wrap_err_with(|| format!("unable to fetch impersonation link for {}", cli.user_id))?;

	Ok(())
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

pub fn build_client(config: &Config) -> Result<Client, Error> {
	let client = Client::builder()
		.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
		.timeout(config.timeout)
		.connect_timeout(config.timeout)
		.build()?;

	Ok(client)
}

/// Token first, then the link. Nothing reaches `out` unless both succeed.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), Error> {
	let config = Config::load(cli)?;
	log::debug!("{APP_NAME} using tenant {}", config.base_url);

	let client = build_client(&config)?;
	let token = Token::fetch(&client, &config)?;
	let link = ImpersonationLink::fetch(&client, &config, &cli.user_id, &token)?;

	out.write_all(link.as_bytes())?;
	out.write_all(b"\n")?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use mockito::{Matcher, Server};
	use serde_json::json;
	use crate::auth0::client_credentials::{CLIENT_ID_VAR, CLIENT_SECRET_VAR};
	use super::*;

	fn cli(base_url: &str, user_id: &str) -> Cli {
		Cli::parse_from(["auth0-impersonate", user_id, "--base-url", base_url, "--timeout", "5"])
	}

	fn run_with_credentials(cli: &Cli, out: &mut Vec<u8>) -> Result<(), Error> {
		temp_env::with_vars(vec![(CLIENT_ID_VAR, Some("client")), (CLIENT_SECRET_VAR, Some("secret"))], || run(cli, out))
	}

	#[test]
	fn prints_the_link() {
		let _ = env_logger::builder().is_test(true).try_init();

		let mut server = Server::new();
		let token = server.mock("POST", "/oauth/token")
			.match_body(Matcher::PartialJson(json!({ "grant_type": "client_credentials" })))
			.with_status(200)
			.with_header("content-type", "application/json")
			.with_body(r#"{"access_token":"abc123","token_type":"Bearer"}"#)
			.create();
		let impersonate = server.mock("POST", "/users/user-1/impersonate")
			.match_header("authorization", "Bearer abc123")
			.match_body(Matcher::PartialJson(json!({
				"protocol": "oauth2",
				"additionalParameters": { "response_type": "token", "scope": DEFAULT_SCOPE },
			})))
			.with_status(200)
			.with_body("https://apex-inc.auth0.com/authorize?client_id=app")
			.create();

		let mut out = Vec::new();
		run_with_credentials(&cli(&server.url(), "user-1"), &mut out).unwrap();

		assert_eq!(String::from_utf8(out).unwrap(), "https://apex-inc.auth0.com/authorize?client_id=app\n");
		token.assert();
		impersonate.assert();
	}

	#[test]
	fn missing_credentials_stop_before_any_request() {
		let mut server = Server::new();
		let any_request = server.mock("POST", Matcher::Any).expect(0).create();

		let mut out = Vec::new();
		let cli = cli(&server.url(), "user-1");
		let err = temp_env::with_vars(vec![(CLIENT_ID_VAR, Some("client")), (CLIENT_SECRET_VAR, None)], || run(&cli, &mut out))
			.unwrap_err();

		assert!(matches!(err, Error::Config(_)), "{err:?}");
		assert!(out.is_empty());
		any_request.assert();
	}

	#[test]
	fn malformed_token_stops_before_impersonation() {
		let mut server = Server::new();
		server.mock("POST", "/oauth/token")
			.with_status(200)
			.with_body("not json")
			.create();
		let impersonate = server.mock("POST", "/users/user-1/impersonate").expect(0).create();

		let mut out = Vec::new();
		let err = run_with_credentials(&cli(&server.url(), "user-1"), &mut out).unwrap_err();

		assert!(matches!(err, Error::Decode(_)), "{err:?}");
		assert!(out.is_empty());
		impersonate.assert();
	}

	#[test]
	fn failed_impersonation_prints_nothing() {
		let mut server = Server::new();
		server.mock("POST", "/oauth/token")
			.with_status(200)
			.with_body(r#"{"access_token":"abc123","token_type":"Bearer"}"#)
			.create();
		server.mock("POST", "/users/user-1/impersonate")
			.with_status(500)
			.with_body("internal error")
			.create();

		let mut out = Vec::new();
		let err = run_with_credentials(&cli(&server.url(), "user-1"), &mut out).unwrap_err();

		assert!(matches!(err, Error::Status { .. }), "{err:?}");
		assert!(out.is_empty());
	}

	#[test]
	fn unreachable_impersonation_prints_nothing() {
		let mut server = Server::new();
		server.mock("POST", "/oauth/token")
			.with_status(200)
			.with_body(r#"{"access_token":"abc123","token_type":"Bearer"}"#)
			.create();
		server.mock("POST", "/users/user-1/impersonate")
			.with_status(200)
			.with_chunked_body(|w| {
				std::thread::sleep(std::time::Duration::from_secs(3));
				w.write_all(b"too late")
			})
			.create();

		let url = server.url();
		let cli = Cli::parse_from(["auth0-impersonate", "user-1", "--base-url", url.as_str(), "--timeout", "1"]);
		let mut out = Vec::new();
		let err = run_with_credentials(&cli, &mut out).unwrap_err();

		assert!(matches!(err, Error::Network(_)), "{err:?}");
		assert!(out.is_empty());
	}

	#[test]
	fn scope_and_ids_are_forwarded() {
		let mut server = Server::new();
		server.mock("POST", "/oauth/token")
			.with_status(200)
			.with_body(r#"{"access_token":"abc123","token_type":"Bearer"}"#)
			.create();
		let impersonate = server.mock("POST", "/users/user-2/impersonate")
			.match_body(Matcher::Json(json!({
				"protocol": "oauth2",
				"impersonator_id": "auth0|admin",
				"client_id": "app",
				"additionalParameters": { "response_type": "token", "scope": "openid" },
			})))
			.with_status(200)
			.with_body("link")
			.create();

		let url = server.url();
		let cli = Cli::parse_from([
			"auth0-impersonate", "user-2",
			"--base-url", url.as_str(),
			"--impersonator-id", "auth0|admin",
			"--client-id", "app",
			"--scope", "openid",
		]);
		let mut out = Vec::new();
		run_with_credentials(&cli, &mut out).unwrap();

		assert_eq!(out, b"link\n");
		impersonate.assert();
	}
}
