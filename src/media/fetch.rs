/// Image fetching over HTTP
/// Downloads delivery URLs and hands the bytes to iced as image handles

use iced::widget::image::Handle;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{url} did not return a decodable image")]
    NotAnImage { url: String },
}

/// Fetch an image and verify the body is an image format we can decode.
///
/// The check only sniffs the header bytes; full decoding happens when iced
/// renders the handle.
pub async fn fetch_image(client: reqwest::Client, url: String) -> Result<Handle, FetchError> {
    let bytes = fetch_bytes(&client, &url).await?;

    if ::image::guess_format(&bytes).is_err() {
        return Err(FetchError::NotAnImage { url });
    }

    tracing::debug!("📸 Fetched {}KB from {}", bytes.len() / 1024, url);
    Ok(Handle::from_bytes(bytes))
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let request_error = |e: reqwest::Error| FetchError::Request {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let response = client.get(url).send().await.map_err(request_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(request_error)?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single HTTP response on a local port and return its URL
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;

            let header = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
        });

        format!("http://{}/image/upload/photo.png", addr)
    }

    /// Smallest PNG signature plus padding, enough for format sniffing
    fn png_bytes() -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 32]);
        bytes
    }

    #[tokio::test]
    async fn test_fetch_image_accepts_png() {
        let url = serve_once("200 OK", png_bytes()).await;
        let result = fetch_image(reqwest::Client::new(), url).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_image_rejects_non_image_body() {
        let url = serve_once("200 OK", b"<html>not found</html>".to_vec()).await;
        let result = fetch_image(reqwest::Client::new(), url).await;
        assert!(matches!(result, Err(FetchError::NotAnImage { .. })));
    }

    #[tokio::test]
    async fn test_fetch_image_reports_status() {
        let url = serve_once("404 Not Found", Vec::new()).await;
        let result = fetch_image(reqwest::Client::new(), url).await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_image_unreachable_host() {
        let result = fetch_image(
            reqwest::Client::new(),
            "http://127.0.0.1:1/image.jpg".to_string(),
        )
        .await;
        assert!(matches!(result, Err(FetchError::Request { .. })));
    }
}
