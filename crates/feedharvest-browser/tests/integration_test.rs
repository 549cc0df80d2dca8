use feedharvest_browser::actions::BrowserActions;
use feedharvest_browser::{BrowserEngine, EngineOptions, SessionCookie};
use std::time::Duration;

fn headless() -> EngineOptions {
    EngineOptions {
        headless: true,
        ..EngineOptions::default()
    }
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_browser_engine_launch() {
    let engine = BrowserEngine::launch(headless()).await;
    assert!(engine.is_ok(), "Failed to launch browser engine");
    engine.unwrap().close().await.expect("close browser");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_navigation_and_inner_html() {
    let engine = BrowserEngine::launch(headless()).await.unwrap();

    engine
        .navigate("data:text/html,<div id='feed'><p class='item'>one</p></div>")
        .await
        .expect("navigate to data URL");

    let html = engine.inner_html("#feed").await.expect("read feed");
    assert!(html.contains("class=\"item\""));

    engine.scroll_to_bottom().await.expect("scroll");
    engine.close().await.expect("close browser");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_missing_selector_times_out() {
    let engine = BrowserEngine::launch(headless()).await.unwrap();
    engine.navigate("about:blank").await.unwrap();

    let result = engine
        .wait_for_selector("#never-rendered", Duration::from_millis(300))
        .await;
    assert!(result.is_err());
    engine.close().await.expect("close browser");
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium and network access
async fn test_set_cookies() {
    let engine = BrowserEngine::launch(headless()).await.unwrap();
    let cookie: SessionCookie = serde_json::from_str(
        r#"{"name": "probe", "value": "1", "domain": "example.com", "path": "/"}"#,
    )
    .unwrap();

    engine.set_cookies(&[cookie]).await.expect("set cookies");
    engine.close().await.expect("close browser");
}
