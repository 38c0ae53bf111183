//! Strategy engine service entry point.

use market_services::Service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    market_services::run(Service::StrategyEngine).await
}
