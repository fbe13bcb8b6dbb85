use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::error::ExecutorError;

/// Drains `rd` to EOF on its own task so a full pipe never stalls the child.
pub fn pump_to_end<R>(mut rd: R, label: &'static str) -> JoinHandle<Result<Vec<u8>, ExecutorError>>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut captured = Vec::new();

        loop {
            let n = rd.read(&mut buf).await.map_err(|e| ExecutorError::StreamIo {
                stream: label,
                source: e,
            })?;
            if n == 0 {
                break;
            }
            captured.extend_from_slice(&buf[..n]);
        }

        Ok(captured)
    })
}

/// Awaits a pump task, folding a panicked or cancelled task into a stream error.
pub async fn join_pump(
    handle: JoinHandle<Result<Vec<u8>, ExecutorError>>,
    label: &'static str,
) -> Result<Vec<u8>, ExecutorError> {
    handle.await.map_err(|e| ExecutorError::StreamIo {
        stream: label,
        source: std::io::Error::new(std::io::ErrorKind::Other, e),
    })?
}
