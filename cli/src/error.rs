use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can abort a run. None of these are recovered from.
#[derive(Debug, Error)]
pub enum Error {
	/// A required input is missing or unusable.
	#[error("configuration error: {0}")]
	Config(String),

	/// The request could not be sent, timed out, or its body could not be read.
	#[error("network error: {0}")]
	Network(#[from] reqwest::Error),

	/// The token endpoint answered with a body that is not the expected JSON.
	#[error("unable to decode response: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("[{endpoint}] non OK response {status}: {body}")]
	Status {
		endpoint: String,
		status: StatusCode,
		body: String,
	},

	#[error("unable to write link: {0}")]
	Output(#[from] std::io::Error),
}
