use std::env;
use std::error;

use reqwest::blocking::Client;
use reqwest::{Method, Url};

// Probes the proxy with a pre-flight request, which succeeds without touching the upstream API
fn main() -> Result<(), Box<dyn error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err("Missing URL argument".into());
    }

    let url = Url::parse(&args[1])?;

    let response = Client::new().request(Method::OPTIONS, url).send()?;
    if !response.status().is_success() {
        return Err(format!("Health check failed with status {}", response.status()).into());
    }

    Ok(())
}
