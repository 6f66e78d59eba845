use anyhow::{bail, Result};
use clap_serde_derive::ClapSerde;
use url::Url;

use crate::upstream::openai::DEFAULT_ENDPOINT;

#[derive(ClapSerde, Debug)]
pub struct Config {
    /// The address the listener binds to
    #[default("0.0.0.0".to_string())]
    #[arg(short, long, env)]
    pub(crate) address: String,

    /// The port the listener binds to
    #[default(8787)]
    #[arg(short, long, env)]
    pub(crate) port: u16,

    /// API key used to authenticate against OpenAI
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub(crate) openai_api_key: String,

    /// The Responses API endpoint evaluations are sent to
    #[default(DEFAULT_ENDPOINT.to_string())]
    #[arg(long, env)]
    pub(crate) openai_endpoint: String,

    /// OTLP collector endpoint, traces are only exported when set
    #[arg(long, env)]
    pub(crate) otlp_endpoint: String,

    /// Keep logging to the console while exporting traces
    #[arg(long, env)]
    pub(crate) console: bool,

    /// PEM certificate file, enables TLS together with the key file
    #[arg(long, env)]
    pub(crate) tls_cert_file: String,

    /// PEM private key file, enables TLS together with the certificate file
    #[arg(long, env)]
    pub(crate) tls_key_file: String,
}

impl Config {
    pub fn from_toml(path: &str) -> Result<Self> {
        let str = std::fs::read_to_string(path)?;
        let opt = toml::from_str::<<Config as ClapSerde>::Opt>(&str)?;
        Ok(Config::from(opt))
    }

    pub fn openai_api_key(&self) -> Option<&str> {
        non_empty(&self.openai_api_key)
    }

    pub fn otlp_endpoint(&self) -> Option<&str> {
        non_empty(&self.otlp_endpoint)
    }

    pub fn openai_endpoint(&self) -> Result<Url> {
        Ok(Url::parse(&self.openai_endpoint)?)
    }

    /// Certificate and key paths, if TLS is configured.
    pub fn tls_files(&self) -> Result<Option<(&str, &str)>> {
        match (non_empty(&self.tls_cert_file), non_empty(&self.tls_key_file)) {
            (Some(cert), Some(key)) => Ok(Some((cert, key))),
            (None, None) => Ok(None),
            _ => bail!("Both tls_cert_file and tls_key_file must be set to enable TLS"),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
