/// Ordered, append-only list of human-readable event lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Logs {
    messages: Vec<String>,
}

impl Logs {
    pub fn add_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        tracing::trace!(target: "dungeon::logs", "{message}");
        self.messages.push(message);
    }

    pub fn add_messages<I>(&mut self, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        for message in messages {
            self.add_message(message);
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Moves every line of `other` to the end of this log.
    pub fn append(&mut self, other: &mut Logs) {
        self.messages.append(&mut other.messages);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
