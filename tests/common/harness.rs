//! Mock-backed embedder and server harness.
//!
//! Every test runs against `MockTransport` tiers with small dimensions, so
//! the suite needs no live embedding backends. The transports are handed
//! back to the test so it can flip failure toggles mid-run.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::task::JoinHandle;

use lodestone::{
    HandlerState, MockTransport, MultiTierEmbedder, TierClient, TierConfig, TierId,
    VectorCacheHandle, create_router,
};

/// Fast-tier dimension used across the suite.
pub const FAST_DIM: usize = 8;
/// Accurate-tier dimension used across the suite.
pub const ACCURATE_DIM: usize = 12;

/// Knobs for one harness instance.
#[derive(Debug, Clone, Copy)]
pub struct TestServerConfig {
    pub fast_dim: usize,
    pub accurate_dim: usize,
    /// Tokens each mock tier reports per embedded text; 0 disables metering.
    pub tokens_per_text: u64,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            fast_dim: FAST_DIM,
            accurate_dim: ACCURATE_DIM,
            tokens_per_text: 0,
        }
    }
}

impl TestServerConfig {
    pub fn with_tokens_per_text(mut self, tokens: u64) -> Self {
        self.tokens_per_text = tokens;
        self
    }
}

/// A multi-tier embedder over mock transports, plus the transports
/// themselves for toggling outages and inspecting call counts.
pub struct MockTiers {
    pub embedder: MultiTierEmbedder,
    pub fast: Arc<MockTransport>,
    pub accurate: Arc<MockTransport>,
}

/// Builds an embedder whose tiers answer deterministically from hashes.
/// Both tiers share one cache, matching the production wiring.
pub fn mock_tiers(config: &TestServerConfig) -> anyhow::Result<MockTiers> {
    let cache = VectorCacheHandle::new();
    let fast = Arc::new(
        MockTransport::new(TierId::Fast, config.fast_dim)
            .with_tokens_per_text(config.tokens_per_text),
    );
    let accurate = Arc::new(
        MockTransport::new(TierId::Accurate, config.accurate_dim)
            .with_tokens_per_text(config.tokens_per_text),
    );

    let fast_client = TierClient::new(
        TierConfig::fast().with_dimension(config.fast_dim),
        fast.clone(),
        cache.clone(),
    )?;
    let accurate_client = TierClient::new(
        TierConfig::accurate().with_dimension(config.accurate_dim),
        accurate.clone(),
        cache,
    )?;

    Ok(MockTiers {
        embedder: MultiTierEmbedder::new(fast_client, accurate_client)?,
        fast,
        accurate,
    })
}

/// A gateway bound to an ephemeral local port, serving mock-backed tiers.
pub struct TestServer {
    addr: SocketAddr,
    pub fast: Arc<MockTransport>,
    pub accurate: Arc<MockTransport>,
    server: JoinHandle<()>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Spawns the full router on `127.0.0.1:0` and returns once it is bound.
pub async fn spawn_test_server(config: TestServerConfig) -> anyhow::Result<TestServer> {
    let tiers = mock_tiers(&config)?;
    let router = create_router(HandlerState::new(Arc::new(tiers.embedder)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer {
        addr,
        fast: tiers.fast,
        accurate: tiers.accurate,
        server,
    })
}
