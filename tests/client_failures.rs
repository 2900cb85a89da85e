use product_rest::prelude::*;
use std::net::TcpListener;
use std::time::{Duration, Instant};

#[test]
fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept connections and never answer.
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });

    let config = ClientConfig {
        base_url: format!("http://{}", addr),
        connect_timeout: Duration::from_secs(2),
        read_timeout: Duration::from_millis(300),
    };
    let client = ProductClient::new(&config).unwrap();

    let started = Instant::now();
    let err = client.get_product1().unwrap_err();
    assert!(err.is_timeout(), "expected a timeout, got {}", err);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_closed_port_is_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let client = ProductClient::new(&ClientConfig::with_base_url(format!("http://{}", addr))).unwrap();
    let err = client.delete(1).unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {}", err);
    assert_eq!(err.status(), None);
}
