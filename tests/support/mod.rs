//! Scripted transport shared by the behavior tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use quotes_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// One scripted upstream behavior.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond(HttpResponse),
    Fail(HttpError),
    Hang(Duration),
    Slow(Duration, HttpResponse),
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self::Respond(HttpResponse::ok_json(body))
    }

    pub fn status(status: u16) -> Self {
        Self::Respond(HttpResponse::with_status(status, "upstream unhappy"))
    }

    pub fn connection_refused() -> Self {
        Self::Fail(HttpError::new("connection failed: refused"))
    }
}

/// Plays replies in order; the last one repeats once the script runs out.
pub struct ScriptedHttpClient {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn always(reply: Reply) -> Arc<Self> {
        Self::new(vec![reply])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().expect("urls lock").clone()
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().expect("replies lock");
        if replies.len() > 1 {
            replies.pop_front().expect("non-empty script")
        } else {
            replies.front().cloned().expect("non-empty script")
        }
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().expect("urls lock").push(request.url);
        let reply = self.next_reply();

        Box::pin(async move {
            match reply {
                Reply::Respond(response) => Ok(response),
                Reply::Fail(error) => Err(error),
                Reply::Hang(duration) => {
                    tokio::time::sleep(duration).await;
                    Ok(HttpResponse::ok_json("{}"))
                }
                Reply::Slow(duration, response) => {
                    tokio::time::sleep(duration).await;
                    Ok(response)
                }
            }
        })
    }
}
