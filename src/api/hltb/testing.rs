use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::Status;

use super::backend::Transport;

/// Scripted transport. Responses are queued per url and replayed in order,
/// the last one repeating once the queue is drained. Unknown urls answer with
/// `Status::NotFound`.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<String, VecDeque<Result<String, Status>>>>,
    calls: Mutex<Vec<String>>,
    bodies: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        FakeTransport::default()
    }

    pub fn on(self, url: &str, response: Result<String, Status>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(url.to_owned())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, url: &str) -> usize {
        self.calls().iter().filter(|call| *call == url).count()
    }

    pub fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }

    fn respond(&self, url: &str) -> Result<String, Status> {
        self.calls.lock().unwrap().push(url.to_owned());

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Err(Status::not_found(format!("404 for {url}"))),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<String, Status> {
        self.respond(url)
    }

    async fn post_json(&self, url: &str, body: String) -> Result<String, Status> {
        self.bodies.lock().unwrap().push(body);
        self.respond(url)
    }
}

#[async_trait]
impl Transport for Arc<FakeTransport> {
    async fn get(&self, url: &str) -> Result<String, Status> {
        self.as_ref().get(url).await
    }

    async fn post_json(&self, url: &str, body: String) -> Result<String, Status> {
        self.as_ref().post_json(url, body).await
    }
}
