#![allow(dead_code)]

use alert_relay_service::config::RelayConfig;
use alert_relay_service::startup::Application;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub blink1_server: MockServer,
}

impl TestApp {
    /// Spawn the relay on a random port, pointed at a mock blink1-server that
    /// answers every request with 200.
    pub async fn spawn() -> Self {
        let blink1_server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .mount(&blink1_server)
            .await;

        Self::spawn_with(blink1_server).await
    }

    /// Spawn the relay against a mock blink1-server the caller has set up.
    pub async fn spawn_with(blink1_server: MockServer) -> Self {
        let config = RelayConfig {
            port: 0,
            blink1_server_url: blink1_server.uri(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let probe_url = format!("{}/livez", address);
        for _ in 0..50 {
            if client.get(&probe_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            blink1_server,
        }
    }

    pub async fn post_alert(&self, body: impl Into<String>) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/alert", self.address))
            .header("content-type", "application/json")
            .body(body.into())
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Requests the mock blink1-server has received so far.
    pub async fn blink1_requests(&self) -> Vec<wiremock::Request> {
        self.blink1_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
    }
}

/// Query string of a received request as sorted key/value pairs.
pub fn query_pairs(request: &wiremock::Request) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = request
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    pairs.sort();
    pairs
}
