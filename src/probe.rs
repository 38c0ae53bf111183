//! Client side of the liveness check.
//!
//! Lets a container run `market-pipeline --healthcheck` as its HEALTHCHECK
//! without shipping curl or wget in the image.

use anyhow::Context;

/// Command-line flag that switches a binary into probe mode.
pub const HEALTHCHECK_FLAG: &str = "--healthcheck";

/// True when the first argument after the program name is [`HEALTHCHECK_FLAG`].
pub fn requested<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .nth(1)
        .is_some_and(|arg| arg.as_ref() == HEALTHCHECK_FLAG)
}

/// URL of the local health endpoint on `port`.
pub fn health_url(port: u16) -> String {
    format!("http://127.0.0.1:{port}/health")
}

/// `GET url` and succeed only on a 2xx status.
pub async fn check(url: &str) -> anyhow::Result<()> {
    let resp = reqwest::get(url)
        .await
        .with_context(|| format!("requesting {url}"))?;

    let status = resp.status();
    anyhow::ensure!(status.is_success(), "{url} returned {status}");
    Ok(())
}
