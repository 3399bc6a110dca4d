use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Assistant, AssistantsApi, Message, Run, RunStatus, Thread, VectorStore};
use crate::error::ChatError;

/// Scripted in-memory assistants API. No API key required; used by the
/// driver and handler tests and for frontend development against canned
/// replies.
///
/// `retrieve_run` pops statuses from a script queue; once the script is
/// exhausted it keeps returning `final_status`. `create_run` always reports
/// a fresh non-terminal run.
pub struct MockAssistants {
    status_script: Mutex<VecDeque<RunStatus>>,
    final_status: RunStatus,
    messages: Mutex<Vec<Message>>,
    vector_stores: Vec<VectorStore>,
    pub calls: CallCounts,
}

/// Per-operation invocation counters.
#[derive(Default)]
pub struct CallCounts {
    pub create_message: AtomicUsize,
    pub create_run: AtomicUsize,
    pub retrieve_run: AtomicUsize,
    pub list_messages: AtomicUsize,
    pub create_assistant: AtomicUsize,
    pub delete_assistant: AtomicUsize,
    pub create_thread: AtomicUsize,
    pub list_vector_stores: AtomicUsize,
}

impl CallCounts {
    fn bump(&self, counter: &AtomicUsize) -> usize {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl MockAssistants {
    /// A mock whose runs complete immediately with no reply messages.
    pub fn new() -> Self {
        Self {
            status_script: Mutex::new(VecDeque::new()),
            final_status: RunStatus::Completed,
            messages: Mutex::new(Vec::new()),
            vector_stores: Vec::new(),
            calls: CallCounts::default(),
        }
    }

    /// Statuses returned by successive `retrieve_run` calls, in order.
    pub fn with_status_script(mut self, script: Vec<RunStatus>) -> Self {
        self.status_script = Mutex::new(script.into());
        self
    }

    /// Status returned once the script is exhausted.
    pub fn with_final_status(mut self, status: RunStatus) -> Self {
        self.final_status = status;
        self
    }

    /// Pre-seeds the thread's message list, newest first.
    pub fn with_messages(self, messages: Vec<Message>) -> Self {
        *self.messages.lock().unwrap() = messages;
        self
    }

    pub fn with_vector_stores(mut self, stores: Vec<VectorStore>) -> Self {
        self.vector_stores = stores;
        self
    }
}

impl Default for MockAssistants {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantsApi for MockAssistants {
    async fn create_message(
        &self,
        _thread_id: &str,
        role: &str,
        content: &str,
    ) -> Result<Message, ChatError> {
        self.calls.bump(&self.calls.create_message);
        Ok(Message {
            role: role.to_string(),
            content: vec![super::ContentPart {
                kind: "text".to_string(),
                text: Some(super::TextContent {
                    value: content.to_string(),
                }),
            }],
        })
    }

    async fn create_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<Run, ChatError> {
        let n = self.calls.bump(&self.calls.create_run);
        Ok(Run {
            id: format!("run_mock_{n}"),
            status: RunStatus::Queued,
        })
    }

    async fn retrieve_run(&self, _thread_id: &str, run_id: &str) -> Result<Run, ChatError> {
        self.calls.bump(&self.calls.retrieve_run);
        let status = self
            .status_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.final_status.clone());
        Ok(Run {
            id: run_id.to_string(),
            status,
        })
    }

    async fn list_messages(&self, _thread_id: &str) -> Result<Vec<Message>, ChatError> {
        self.calls.bump(&self.calls.list_messages);
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn create_assistant(
        &self,
        _name: &str,
        _model: &str,
        _instructions: &str,
        _vector_store_id: &str,
    ) -> Result<Assistant, ChatError> {
        let n = self.calls.bump(&self.calls.create_assistant);
        Ok(Assistant {
            id: format!("asst_mock_{n}"),
        })
    }

    async fn delete_assistant(&self, _assistant_id: &str) -> Result<(), ChatError> {
        self.calls.bump(&self.calls.delete_assistant);
        Ok(())
    }

    async fn create_thread(&self) -> Result<Thread, ChatError> {
        let n = self.calls.bump(&self.calls.create_thread);
        Ok(Thread {
            id: format!("thread_mock_{n}"),
        })
    }

    async fn list_vector_stores(&self) -> Result<Vec<VectorStore>, ChatError> {
        self.calls.bump(&self.calls.list_vector_stores);
        Ok(self.vector_stores.clone())
    }
}
