use std::fmt::{Debug, Formatter};
use crate::env;
use crate::error::Error;

pub const CLIENT_ID_VAR: &str = "AUTH0_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "AUTH0_CLIENT_SECRET";

pub struct ClientCredentials {
	pub id: String,
	pub secret: String,
}

impl ClientCredentials {
	pub fn from_env() -> Result<ClientCredentials, Error> {
		Ok(ClientCredentials {
			id: env::must_get(CLIENT_ID_VAR)?,
			secret: env::must_get(CLIENT_SECRET_VAR)?,
		})
	}
}

impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClientCredentials")
			.field("id", &self.id)
			.field("secret", &"<redacted>")
			.finish()
	}
}
