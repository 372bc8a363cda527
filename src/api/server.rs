use std::net::SocketAddr;

use super::router::dashboard_router;
use super::types::ApiContext;

/// Bind and serve the dashboard API until the process exits.
pub async fn serve(ctx: ApiContext, addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!("Dashboard listening on http://{local}");

    axum::serve(listener, dashboard_router(ctx)).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::crypto::StoreKey;
    use crate::db::Store;
    use crate::ingest::NullOcr;

    #[tokio::test]
    async fn server_binds_an_ephemeral_port() {
        let store = Store::open_in_memory(StoreKey::generate()).unwrap();
        let ctx = ApiContext::new(Arc::new(store), Arc::new(NullOcr));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            axum::serve(listener, dashboard_router(ctx)).await.unwrap();
        });

        // The socket accepts connections while the server task runs
        let stream = tokio::net::TcpStream::connect(addr).await;
        assert!(stream.is_ok());
        server.abort();
    }
}
