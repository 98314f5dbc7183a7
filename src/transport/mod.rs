//! WebSocket link to the gesture backend.
//!
//! A background thread owns the socket and forwards decoded events over a
//! channel; the event loop drains it without blocking.
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tungstenite::{HandshakeError, Message, WebSocket};
use url::Url;

use crate::protocol::{self, Event};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Errors raised before the reader thread starts.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid backend url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported url scheme `{0}` (expected ws)")]
    UnsupportedScheme(String),
    #[error("backend url has no host: {0}")]
    MissingHost(String),
    #[error("failed to spawn transport thread")]
    Spawn(#[source] std::io::Error),
}

/// Something that happened on the link.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Connected,
    Event(Event),
    /// The link is gone; carries the reason when it was not a clean close.
    Disconnected(Option<String>),
}

/// Handle to a running backend connection.
///
/// Dropping the handle closes the socket and stops the reader thread.
pub struct GestureLink {
    rx: Receiver<TransportEvent>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    url: Url,
}

impl GestureLink {
    /// Start connecting to `url` in the background.
    ///
    /// # Errors
    /// Returns an error if the URL is malformed or not a `ws://` URL.
    pub fn connect(url: &str) -> Result<Self, TransportError> {
        let url = validate_url(url)?;
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let thread_url = url.clone();
        let thread_stop = Arc::clone(&stop);
        let handle = std::thread::Builder::new()
            .name("gesture-link".to_string())
            .spawn(move || run_link(&thread_url, &tx, &thread_stop))
            .map_err(TransportError::Spawn)?;

        Ok(Self {
            rx,
            stop,
            handle: Some(handle),
            url,
        })
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Take every event received since the last call, in arrival order.
    pub fn drain(&self) -> Vec<TransportEvent> {
        self.rx.try_iter().collect()
    }

    /// Block up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TransportEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl Drop for GestureLink {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            // Every blocking read, handshake included, wakes within READ_TIMEOUT.
            let _ = handle.join();
        }
        tracing::debug!(url = %self.url, "gesture link closed");
    }
}

fn validate_url(raw: &str) -> Result<Url, TransportError> {
    let url = Url::parse(raw).map_err(|source| TransportError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.scheme() != "ws" {
        return Err(TransportError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(TransportError::MissingHost(raw.to_string()));
    }
    Ok(url)
}

fn run_link(url: &Url, tx: &Sender<TransportEvent>, stop: &AtomicBool) {
    let reason = match open_socket(url, stop) {
        Ok(mut socket) => {
            tracing::info!(%url, "connected to gesture backend");
            if tx.send(TransportEvent::Connected).is_err() {
                return;
            }
            read_frames(&mut socket, tx, stop)
        }
        Err(err) => {
            tracing::warn!(%url, %err, "gesture backend unavailable");
            Some(err)
        }
    };
    if stop.load(Ordering::Relaxed) {
        return;
    }
    tracing::info!(%url, reason = reason.as_deref().unwrap_or("closed"), "gesture backend disconnected");
    let _ = tx.send(TransportEvent::Disconnected(reason));
}

fn open_socket(url: &Url, stop: &AtomicBool) -> Result<WebSocket<TcpStream>, String> {
    let addrs: Vec<SocketAddr> = url
        .socket_addrs(|| Some(80))
        .map_err(|err| format!("resolve failed: {err}"))?;
    let mut last_err = String::from("no addresses resolved");
    for addr in addrs {
        if stop.load(Ordering::Relaxed) {
            return Err("cancelled".to_string());
        }
        match TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT) {
            Ok(stream) => return handshake(url, stream, stop),
            Err(err) => last_err = format!("connect {addr} failed: {err}"),
        }
    }
    Err(last_err)
}

/// Run the upgrade in `READ_TIMEOUT` steps so a silent peer cannot pin the
/// thread past `CONNECT_TIMEOUT` or past a stop request.
fn handshake(
    url: &Url,
    stream: TcpStream,
    stop: &AtomicBool,
) -> Result<WebSocket<TcpStream>, String> {
    let _ = stream.set_nodelay(true);
    stream
        .set_read_timeout(Some(READ_TIMEOUT))
        .and_then(|()| stream.set_write_timeout(Some(CONNECT_TIMEOUT)))
        .map_err(|err| format!("socket setup failed: {err}"))?;

    let deadline = Instant::now() + CONNECT_TIMEOUT;
    let mut attempt = tungstenite::client(url.as_str(), stream);
    loop {
        match attempt {
            Ok((socket, _response)) => return Ok(socket),
            Err(HandshakeError::Interrupted(mid)) => {
                if stop.load(Ordering::Relaxed) {
                    return Err("cancelled".to_string());
                }
                if Instant::now() >= deadline {
                    return Err("handshake timed out".to_string());
                }
                attempt = mid.handshake();
            }
            Err(HandshakeError::Failure(err)) => return Err(format!("handshake failed: {err}")),
        }
    }
}

/// Pump frames until the peer goes away or `stop` is raised.
///
/// Returns the disconnect reason, `None` for a clean close.
fn read_frames(
    socket: &mut WebSocket<TcpStream>,
    tx: &Sender<TransportEvent>,
    stop: &AtomicBool,
) -> Option<String> {
    loop {
        if stop.load(Ordering::Relaxed) {
            let _ = socket.close(None);
            let _ = socket.flush();
            return None;
        }
        match socket.read() {
            Ok(Message::Text(text)) => {
                if let Some(event) = protocol::parse_message(&text) {
                    if tx.send(TransportEvent::Event(event)).is_err() {
                        return None;
                    }
                }
            }
            Ok(Message::Close(_)) => {
                // Sends the queued close acknowledgement.
                let _ = socket.flush();
                return None;
            }
            Ok(_) => {}
            Err(tungstenite::Error::Io(err))
                if matches!(
                    err.kind(),
                    std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                ) => {}
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                return None;
            }
            Err(err) => return Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{GestureAction, ScrollDirection};
    use std::net::TcpListener;

    const WAIT: Duration = Duration::from_secs(5);

    fn serve_once(frames: Vec<&'static str>) -> (String, std::thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let handle = std::thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut ws = tungstenite::accept(stream).expect("handshake");
            for frame in frames {
                ws.send(Message::text(frame)).expect("send");
            }
            let _ = ws.close(None);
            // Drive the close handshake until the client acknowledges.
            while ws.read().is_ok() {}
        });
        (format!("ws://{addr}"), handle)
    }

    fn collect_until_disconnect(link: &GestureLink) -> Vec<TransportEvent> {
        let mut events = Vec::new();
        while let Some(event) = link.recv_timeout(WAIT) {
            let done = matches!(event, TransportEvent::Disconnected(_));
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[test]
    fn test_rejects_non_websocket_urls() {
        assert!(matches!(
            GestureLink::connect("http://localhost:8080"),
            Err(TransportError::UnsupportedScheme(s)) if s == "http"
        ));
        assert!(matches!(
            GestureLink::connect("wss://localhost:8080"),
            Err(TransportError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            GestureLink::connect("not a url"),
            Err(TransportError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_events_arrive_in_order_and_garbage_is_dropped() {
        let (url, server) = serve_once(vec![
            r#"{"type":"CURSOR","x":0.5,"y":0.25}"#,
            "garbage",
            r#"{"type":"SCROLL","dir":"DOWN"}"#,
            r#"{"type":"TELEPORT"}"#,
            r#"{"type":"GESTURE","action":"NEXT"}"#,
        ]);
        let link = GestureLink::connect(&url).expect("connect");
        let events = collect_until_disconnect(&link);
        server.join().expect("server");

        assert_eq!(
            events,
            vec![
                TransportEvent::Connected,
                TransportEvent::Event(Event::Cursor { x: 0.5, y: 0.25 }),
                TransportEvent::Event(Event::Scroll {
                    dir: ScrollDirection::Down
                }),
                TransportEvent::Event(Event::Gesture {
                    action: GestureAction::Next
                }),
                TransportEvent::Disconnected(None),
            ]
        );
    }

    #[test]
    fn test_refused_connection_reports_disconnected() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("addr").port()
        };
        let link = GestureLink::connect(&format!("ws://127.0.0.1:{port}")).expect("connect");
        let event = link.recv_timeout(WAIT).expect("event");
        assert!(matches!(event, TransportEvent::Disconnected(Some(_))));
    }

    #[test]
    fn test_drop_during_stalled_handshake_returns() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
        let server = std::thread::spawn(move || {
            // Accept, then never answer the upgrade request.
            let (_stream, _) = listener.accept().expect("accept");
            let _ = release_rx.recv_timeout(WAIT);
        });

        let link = GestureLink::connect(&format!("ws://{addr}")).expect("connect");
        std::thread::sleep(Duration::from_millis(200));

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            drop(link);
            let _ = done_tx.send(());
        });
        assert!(
            done_rx.recv_timeout(Duration::from_secs(2)).is_ok(),
            "dropping the link should not wait on the handshake"
        );
        let _ = release_tx.send(());
        server.join().expect("server");
    }

    #[test]
    fn test_silent_backend_times_out_as_disconnected() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = std::thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            std::thread::sleep(CONNECT_TIMEOUT + Duration::from_secs(1));
            drop(stream);
        });

        let link = GestureLink::connect(&format!("ws://{addr}")).expect("connect");
        let event = link.recv_timeout(WAIT).expect("event");
        assert_eq!(
            event,
            TransportEvent::Disconnected(Some("handshake timed out".to_string()))
        );
        drop(link);
        server.join().expect("server");
    }

    #[test]
    fn test_drop_closes_open_connection() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server = std::thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let mut ws = tungstenite::accept(stream).expect("handshake");
            loop {
                match ws.read() {
                    Ok(Message::Close(_)) | Err(_) => return true,
                    Ok(_) => {}
                }
            }
        });

        let link = GestureLink::connect(&format!("ws://{addr}")).expect("connect");
        assert_eq!(link.recv_timeout(WAIT), Some(TransportEvent::Connected));
        drop(link);
        assert!(server.join().expect("server"));
    }
}
