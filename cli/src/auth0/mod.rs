pub mod http_interface;
pub mod config;
pub mod client_credentials;
pub mod token;
pub mod impersonation;
