// HTTPS transport: rustls config from PEM files and a connection-capped TLS listener for axum::serve.

use anyhow::Context;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use std::io;
use std::net::SocketAddr;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc};
use tokio::time::{Duration, Instant, Sleep, sleep, timeout};
use tokio_rustls::TlsAcceptor;
use tokio_rustls::server::TlsStream;

/// Pause after a failed accept (e.g. out of file descriptors) before retrying.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Load the trust anchors a client certificate is checked against. At least one is required.
pub fn load_trust_anchors(ca_path: &Path) -> anyhow::Result<RootCertStore> {
    let mut roots = RootCertStore::empty();
    let certs = CertificateDer::pem_file_iter(ca_path)
        .with_context(|| format!("reading trust anchors from {}", ca_path.display()))?;
    for cert in certs {
        let cert =
            cert.with_context(|| format!("parsing trust anchors in {}", ca_path.display()))?;
        roots
            .add(cert)
            .with_context(|| format!("adding trust anchor from {}", ca_path.display()))?;
    }
    anyhow::ensure!(
        !roots.is_empty(),
        "no certificates found in trust anchor file {}",
        ca_path.display()
    );
    Ok(roots)
}

/// Build the server TLS config. Client certificates are requested and verified against
/// the trust anchors only when `require_client_auth` is set.
pub fn load_server_config(
    cert_path: &Path,
    key_path: &Path,
    ca_path: &Path,
    require_client_auth: bool,
) -> anyhow::Result<ServerConfig> {
    let certs = CertificateDer::pem_file_iter(cert_path)
        .with_context(|| format!("reading certificate chain {}", cert_path.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("parsing certificate chain {}", cert_path.display()))?;
    anyhow::ensure!(
        !certs.is_empty(),
        "no certificates found in {}",
        cert_path.display()
    );
    let key = PrivateKeyDer::from_pem_file(key_path)
        .with_context(|| format!("reading private key {}", key_path.display()))?;
    let roots = load_trust_anchors(ca_path)?;
    tracing::info!(
        trust_anchors = roots.len(),
        require_client_auth,
        "TLS credentials loaded"
    );

    let builder = ServerConfig::builder();
    let builder = if require_client_auth {
        let verifier = WebPkiClientVerifier::builder(Arc::new(roots))
            .build()
            .context("building client certificate verifier")?;
        builder.with_client_cert_verifier(verifier)
    } else {
        builder.with_no_client_auth()
    };
    let mut config = builder
        .with_single_cert(certs, key)
        .context("certificate chain does not match private key")?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];
    Ok(config)
}

/// An established TLS connection. Holds its connection slot until dropped.
///
/// Reads and writes fail with `TimedOut` once the connection has made no progress for
/// `idle_timeout`, so a silent client gives its slot back instead of keeping it forever.
pub struct TlsConnection {
    stream: TlsStream<TcpStream>,
    peer: SocketAddr,
    idle_timeout: Duration,
    idle: Pin<Box<Sleep>>,
    _permit: OwnedSemaphorePermit,
}

impl TlsConnection {
    fn new(
        stream: TlsStream<TcpStream>,
        peer: SocketAddr,
        idle_timeout: Duration,
        permit: OwnedSemaphorePermit,
    ) -> Self {
        Self {
            stream,
            peer,
            idle_timeout,
            idle: Box::pin(sleep(idle_timeout)),
            _permit: permit,
        }
    }

    fn touch(&mut self) {
        self.idle.as_mut().reset(Instant::now() + self.idle_timeout);
    }

    fn poll_idle<T>(&mut self, cx: &mut TaskContext<'_>) -> Poll<io::Result<T>> {
        match self.idle.as_mut().poll(cx) {
            Poll::Ready(()) => {
                tracing::debug!(peer = %self.peer, "closing idle connection");
                Poll::Ready(Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "connection idle timeout",
                )))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl AsyncRead for TlsConnection {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut TaskContext<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        match Pin::new(&mut this.stream).poll_read(cx, buf) {
            Poll::Ready(result) => {
                this.touch();
                Poll::Ready(result)
            }
            Poll::Pending => this.poll_idle(cx),
        }
    }
}

impl AsyncWrite for TlsConnection {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut TaskContext<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        match Pin::new(&mut this.stream).poll_write(cx, buf) {
            Poll::Ready(result) => {
                this.touch();
                Poll::Ready(result)
            }
            Poll::Pending => this.poll_idle(cx),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_shutdown(cx)
    }

    fn poll_write_vectored(
        self: Pin<&mut Self>,
        cx: &mut TaskContext<'_>,
        bufs: &[io::IoSlice<'_>],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        match Pin::new(&mut this.stream).poll_write_vectored(cx, bufs) {
            Poll::Ready(result) => {
                this.touch();
                Poll::Ready(result)
            }
            Poll::Pending => this.poll_idle(cx),
        }
    }

    fn is_write_vectored(&self) -> bool {
        self.stream.is_write_vectored()
    }
}

/// Listener for `axum::serve` yielding TLS connections.
///
/// A background task accepts TCP connections while fewer than `max_connections` are open,
/// and runs each handshake in its own task so a slow client never stalls the accept loop.
/// Handshakes are bounded by `handshake_timeout`, established connections by `idle_timeout`.
pub struct TlsListener {
    incoming: mpsc::Receiver<(TlsConnection, SocketAddr)>,
    local_addr: SocketAddr,
}

impl TlsListener {
    pub async fn bind(
        addr: SocketAddr,
        acceptor: TlsAcceptor,
        max_connections: usize,
        handshake_timeout: Duration,
        idle_timeout: Duration,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let (tx, incoming) = mpsc::channel(max_connections.max(1));
        let permits = Arc::new(Semaphore::new(max_connections));
        tokio::spawn(accept_loop(
            listener,
            acceptor,
            permits,
            handshake_timeout,
            idle_timeout,
            tx,
        ));
        Ok(Self {
            incoming,
            local_addr,
        })
    }
}

impl axum::serve::Listener for TlsListener {
    type Io = TlsConnection;
    type Addr = SocketAddr;

    async fn accept(&mut self) -> (Self::Io, Self::Addr) {
        match self.incoming.recv().await {
            Some(conn) => conn,
            // Accept loop is gone; nothing more will arrive.
            None => std::future::pending().await,
        }
    }

    fn local_addr(&self) -> io::Result<Self::Addr> {
        Ok(self.local_addr)
    }
}

async fn accept_loop(
    listener: TcpListener,
    acceptor: TlsAcceptor,
    permits: Arc<Semaphore>,
    handshake_timeout: Duration,
    idle_timeout: Duration,
    tx: mpsc::Sender<(TlsConnection, SocketAddr)>,
) {
    loop {
        let permit = match permits.clone().acquire_owned().await {
            Ok(p) => p,
            Err(_) => return,
        };
        if permits.available_permits() == 0 {
            tracing::debug!(operation = "accept", "connection limit reached");
        }
        let (tcp, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(error = %e, operation = "accept", "accept failed");
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                continue;
            }
        };
        if tx.is_closed() {
            return;
        }
        let acceptor = acceptor.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match timeout(handshake_timeout, acceptor.accept(tcp)).await {
                Ok(Ok(stream)) => {
                    let conn = TlsConnection::new(stream, peer, idle_timeout, permit);
                    if tx.send((conn, peer)).await.is_err() {
                        tracing::debug!(%peer, "server stopped; dropping connection");
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!(%peer, error = %e, operation = "tls_handshake", "TLS handshake failed");
                }
                Err(_) => {
                    tracing::warn!(%peer, operation = "tls_handshake", "TLS handshake timed out");
                }
            }
        });
    }
}
