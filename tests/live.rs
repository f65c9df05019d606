//! Opt-in smoke test against a real Teamwork installation.
//!
//! Skipped unless both `TEAMWORK_SERVER` and `TEAMWORK_API_TOKEN` are set;
//! it only reads, never writes.

use teamwork_mcp::config::{API_TOKEN_ENV, Config, SERVER_ENV};
use teamwork_mcp::twapi::{Engine, project};

fn live_config() -> Option<Config> {
    let server = std::env::var(SERVER_ENV).ok()?;
    let api_token = std::env::var(API_TOKEN_ENV).ok()?;
    Config::resolve(Some(server), Some(api_token)).ok()
}

#[tokio::test]
async fn test_live_project_listing() {
    let Some(config) = live_config() else {
        eprintln!("skipping: {SERVER_ENV}/{API_TOKEN_ENV} not set");
        return;
    };
    rustls::crypto::ring::default_provider().install_default().ok();
    let engine = Engine::new(config);

    let mut entity = project::Multiple::default();
    engine
        .dispatch(&mut entity, &mut [])
        .await
        .expect("listing projects against the live installation failed");

    for p in &entity.projects {
        assert!(p.id > 0);
        assert!(p.web_link.as_deref().unwrap_or_default().contains("/app/projects/"));
    }
}
