use crate::error::{Result, WhiteboardError};
use crate::transport::ImageTransport;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// A single in-flight image-to-HTML request running on a worker thread.
///
/// The canvas lock is never involved: the worker only sees the PNG bytes it
/// was handed.
pub struct SendJob {
    rx: Receiver<Result<String>>,
}

impl SendJob {
    pub fn spawn<F, N>(png: Vec<u8>, make_transport: F, notify: N) -> Self
    where
        F: FnOnce() -> Result<Box<dyn ImageTransport>> + Send + 'static,
        N: Fn() + Send + 'static,
    {
        let (tx, rx) = channel();
        std::thread::spawn(move || {
            let result = make_transport().and_then(|transport| transport.send(&png));
            if let Err(e) = &result {
                tracing::error!(error = %e, "send failed");
            }
            let _ = tx.send(result);
            notify();
        });
        Self { rx }
    }

    /// `None` while the request is still running.
    pub fn poll(&self) -> Option<Result<String>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(WhiteboardError::Transport(
                "send worker exited without a result".into(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct EchoTransport;

    impl ImageTransport for EchoTransport {
        fn send(&self, png: &[u8]) -> Result<String> {
            Ok(format!("<p>{}</p>", png.len()))
        }
    }

    fn wait(job: &SendJob) -> Result<String> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = job.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "send job did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn worker_result_is_delivered_and_notifies() {
        let notified = Arc::new(AtomicBool::new(false));
        let flag = notified.clone();
        let job = SendJob::spawn(
            vec![0; 3],
            || Ok(Box::new(EchoTransport) as Box<dyn ImageTransport>),
            move || flag.store(true, Ordering::SeqCst),
        );

        assert_eq!(wait(&job).unwrap(), "<p>3</p>");
        let deadline = Instant::now() + Duration::from_secs(5);
        while !notified.load(Ordering::SeqCst) {
            assert!(Instant::now() < deadline, "notify was not called");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn transport_construction_errors_are_returned() {
        let job = SendJob::spawn(
            Vec::new(),
            || Err(WhiteboardError::Config("API_KEY is not set".into())),
            || {},
        );
        assert!(matches!(wait(&job), Err(WhiteboardError::Config(_))));
    }
}
