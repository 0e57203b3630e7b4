//! TCP command listener.
//!
//! Each accepted connection gets its own task. A connection reads
//! newline-terminated requests and writes exactly one reply line per request
//! until the client closes its side. A request longer than [`MAX_LINE_LEN`]
//! is answered with an error line and the connection is closed.

use std::future::Future;
use std::time::Duration;

use skerry_router::{CommandError, Router};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Longest accepted request line, excluding the trailing newline.
const MAX_LINE_LEN: usize = 1024;

/// Pause after a failed accept so a persistent error (e.g. EMFILE) does not spin.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Accept connections on `listener` until `shutdown` completes.
///
/// Connections already being served keep running after the accept loop
/// stops.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()>,
) -> std::io::Result<()> {
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("command listener stopping");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                        continue;
                    }
                };
                debug!(%peer, "accepted connection");

                let router = router.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, router).await {
                        warn!(%peer, error = %e, "connection failed");
                    }
                    debug!(%peer, "connection closed");
                });
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, router: Router) -> std::io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        // One byte past the limit tells an oversized line apart from one
        // that fits exactly with its newline.
        let n = (&mut reader)
            .take(MAX_LINE_LEN as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if n == 0 {
            return Ok(());
        }

        if buf.last() != Some(&b'\n') && buf.len() > MAX_LINE_LEN {
            warn!(limit = MAX_LINE_LEN, "request line too long, closing connection");
            writer
                .write_all(format!("{}\n", CommandError::Malformed).as_bytes())
                .await?;
            writer.shutdown().await?;
            return Ok(());
        }

        let reply = match std::str::from_utf8(&buf) {
            Ok(line) => {
                debug!(request = %line.trim(), "received request");
                router.dispatch(line).await
            }
            Err(e) => {
                debug!(error = %e, "request is not valid utf-8");
                format!("{}\n", CommandError::Malformed)
            }
        };
        writer.write_all(reply.as_bytes()).await?;
    }
}
