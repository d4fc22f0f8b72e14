//! Message queue with a display cursor
//!
//! Messages are kept in arrival order. The cursor, when set, always names a
//! valid index; every operation that shrinks the queue re-normalizes it.

use airsign_protocol::MessagePayload;
use heapless::Vec;

/// Maximum queued messages
pub const QUEUE_CAPACITY: usize = 16;

/// Ordered messages plus the index currently shown
#[derive(Debug, Clone, Default)]
pub struct MessageQueue {
    messages: Vec<MessagePayload, QUEUE_CAPACITY>,
    cursor: Option<usize>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and append a JSON message
    ///
    /// A malformed document is logged and dropped. Returns whether the
    /// message was queued.
    pub fn append_json(&mut self, payload: &[u8]) -> bool {
        match MessagePayload::from_json(payload) {
            Ok(message) => {
                self.push(message);
                true
            }
            Err(e) => {
                crate::error!("dropping message payload: {}", e);
                false
            }
        }
    }

    /// Append a message, evicting the oldest when full
    pub fn push(&mut self, message: MessagePayload) {
        if self.messages.is_full() {
            crate::warn!("message queue full, evicting oldest");
            self.messages.remove(0);
            self.cursor = match self.cursor {
                Some(0) | None => None,
                Some(c) => Some(c - 1),
            };
        }
        // Cannot fail: a slot was freed above
        let _ = self.messages.push(message);
        crate::debug!("queued message, {} pending", self.messages.len());
    }

    /// Remove the message under the cursor
    ///
    /// The cursor then steps back one (wrapping); landing on the last index
    /// unsets it so the next advance starts from the beginning. Returns
    /// `None` without touching the queue when no cursor is set.
    pub fn remove_current(&mut self) -> Option<MessagePayload> {
        let current = self.cursor?;
        let removed = self.messages.remove(current);
        let len = self.messages.len();
        self.cursor = if len == 0 {
            None
        } else {
            let back = (current + len - 1) % len;
            (back != len - 1).then_some(back)
        };
        Some(removed)
    }

    /// Move to the next message
    ///
    /// Starts at index 0 when no cursor is set. Returns `None` (and unsets
    /// the cursor) when a pass wraps past the last message.
    pub fn advance(&mut self) -> Option<usize> {
        if self.messages.is_empty() {
            self.cursor = None;
            return None;
        }
        let next = match self.cursor {
            Some(c) => {
                let next = (c + 1) % self.messages.len();
                if next == 0 {
                    self.cursor = None;
                    return None;
                }
                next
            }
            None => 0,
        };
        self.cursor = Some(next);
        Some(next)
    }

    /// Forget the cursor; the next advance shows index 0
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&MessagePayload> {
        self.cursor.and_then(|c| self.messages.get(c))
    }

    pub fn get(&self, index: usize) -> Option<&MessagePayload> {
        self.messages.get(index)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessagePayload> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn queue_of(texts: &[&str]) -> MessageQueue {
        let mut q = MessageQueue::new();
        for t in texts {
            q.push(MessagePayload::text_only(t));
        }
        q
    }

    fn current_text(q: &MessageQueue) -> Option<&str> {
        q.current().and_then(MessagePayload::text)
    }

    #[test]
    fn test_advance_cycles_then_wraps() {
        let mut q = queue_of(&["a", "b", "c"]);
        assert_eq!(q.advance(), Some(0));
        assert_eq!(q.advance(), Some(1));
        assert_eq!(q.advance(), Some(2));
        assert_eq!(q.advance(), None);
        assert_eq!(q.cursor(), None);
        assert_eq!(q.advance(), Some(0));
    }

    #[test]
    fn test_remove_only_message() {
        let mut q = queue_of(&["a"]);
        q.advance();
        assert!(q.remove_current().is_some());
        assert!(q.is_empty());
        assert_eq!(q.cursor(), None);
    }

    #[test]
    fn test_remove_middle_steps_back() {
        let mut q = queue_of(&["a", "b", "c"]);
        q.advance();
        q.advance();
        let removed = q.remove_current().unwrap();
        assert_eq!(removed.text(), Some("b"));
        assert_eq!(q.cursor(), Some(0));
        assert_eq!(current_text(&q), Some("a"));
        assert_eq!(q.advance(), Some(1));
        assert_eq!(current_text(&q), Some("c"));
    }

    #[test]
    fn test_remove_first_collapses_cursor() {
        let mut q = queue_of(&["a", "b", "c"]);
        q.advance();
        q.remove_current();
        // (0 - 1) mod 2 == 1 == last index: fresh start
        assert_eq!(q.cursor(), None);
        assert_eq!(q.advance(), Some(0));
        assert_eq!(current_text(&q), Some("b"));
    }

    #[test]
    fn test_remove_without_cursor_is_noop() {
        let mut q = queue_of(&["a", "b"]);
        assert!(q.remove_current().is_none());
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_append_json() {
        let mut q = MessageQueue::new();
        assert!(q.append_json(br#"{"text":"hi"}"#));
        assert!(!q.append_json(b"not json"));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_full_queue_evicts_oldest() {
        let mut q = MessageQueue::new();
        for i in 0..QUEUE_CAPACITY {
            q.push(MessagePayload::text_only(&alloc::format!("m{}", i)));
        }
        q.advance();
        q.advance();
        assert_eq!(q.cursor(), Some(1));
        q.push(MessagePayload::text_only("new"));
        assert_eq!(q.len(), QUEUE_CAPACITY);
        assert_eq!(q.get(0).and_then(MessagePayload::text), Some("m1"));
        assert_eq!(q.get(QUEUE_CAPACITY - 1).and_then(MessagePayload::text), Some("new"));
        // Still on "m1"
        assert_eq!(q.cursor(), Some(0));
        assert_eq!(current_text(&q), Some("m1"));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push,
        Advance,
        Remove,
        Reset,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Push),
            Just(Op::Advance),
            Just(Op::Remove),
            Just(Op::Reset),
        ]
    }

    proptest! {
        #[test]
        fn test_cursor_always_valid(ops in prop::collection::vec(op(), 0..80)) {
            let mut q = MessageQueue::new();
            for op in ops {
                match op {
                    Op::Push => q.push(MessagePayload::text_only("x")),
                    Op::Advance => { q.advance(); }
                    Op::Remove => { q.remove_current(); }
                    Op::Reset => q.reset_cursor(),
                }
                prop_assert!(q.len() <= QUEUE_CAPACITY);
                if let Some(c) = q.cursor() {
                    prop_assert!(c < q.len());
                }
            }
        }
    }
}
