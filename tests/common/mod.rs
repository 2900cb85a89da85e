use product_rest::prelude::*;
use product_rest::product::RecordingDiagnostics;
use std::net::TcpListener;
use std::sync::Arc;
use tokio::sync::oneshot;

/// A product server on an ephemeral port, running on its own runtime thread.
/// Dropping it triggers graceful shutdown.
pub struct TestServer {
    pub base_url: String,
    pub diagnostics: Arc<RecordingDiagnostics>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn client(&self) -> ProductClient {
        ProductClient::new(&ClientConfig::with_base_url(&self.base_url)).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub fn spawn_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let container = app::build_container(diagnostics.clone()).unwrap();
    let router = app::build_router(&container).unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            app::serve(listener, router, async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
        });
    });

    TestServer {
        base_url: format!("http://{}", addr),
        diagnostics,
        shutdown: Some(shutdown_tx),
    }
}
