use std::ffi::OsStr;
use std::fmt::Display;
use crate::error::Error;

pub fn must_get<K: AsRef<OsStr> + Display + Copy>(key: K) -> Result<String, Error> {
	match std::env::var(key) {
		Ok(val) => Ok(val),
		Err(std::env::VarError::NotPresent) => Err(Error::Config(format!("expected {key} to be present in environment"))),
		Err(std::env::VarError::NotUnicode(_)) => Err(Error::Config(format!("expected value for key {key} in environment to be valid UTF-8"))),
	}
}
