use fixrag_server::{config::Config, run};
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

/// Spawns the server on a random port with the given configuration and
/// returns its base address.
pub async fn spawn_app(config: Config) -> String {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{port}");

    tokio::spawn(async move {
        if let Err(e) = run(listener, config).await {
            eprintln!("Server error: {e}");
        }
    });

    // Give the server a moment to start
    sleep(Duration::from_millis(100)).await;

    address
}

/// A configuration pointing both outbound calls at mock hosts.
pub fn test_config(kb_url: &str, api_url: &str) -> Config {
    Config {
        port: 0,
        api_key: "test-key".to_string(),
        api_url: api_url.to_string(),
        kb_url: kb_url.to_string(),
        proxy_url: None,
    }
}
