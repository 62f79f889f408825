//! Property tests for the rewind invariant documented in the buffered
//! stream's component design: `mark(C); <accepts/discards>; rewind()`
//! restores the stream to the state it was in right after `mark(C)`.

use mylc_util::{BufferedStream, Sentinel};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Value(u32),
    Eof,
}

impl Sentinel for Item {
    fn is_sentinel(&self) -> bool {
        matches!(self, Item::Eof)
    }
}

fn make_stream(values: Vec<u32>) -> BufferedStream<Item> {
    let items: Vec<Item> = values.into_iter().map(Item::Value).collect();
    BufferedStream::new(items.into_iter(), Item::Eof)
}

proptest! {
    #[test]
    fn rewind_restores_the_checkpointed_position(
        values in prop::collection::vec(0u32..1000, 5..30),
        prefix_len in 0usize..5,
        accept_len in 0usize..10,
    ) {
        let mut stream = make_stream(values.clone());

        let prefix_len = prefix_len.min(values.len());
        for _ in 0..prefix_len {
            stream.accept();
        }

        stream.mark_checkpoint();
        let expected_next = stream.peek(0);

        let accept_len = accept_len.min(values.len().saturating_sub(prefix_len));
        for i in 0..accept_len {
            if i % 2 == 0 {
                stream.accept();
            } else {
                stream.discard();
            }
        }

        stream.rewind();
        prop_assert_eq!(stream.next(), expected_next);
    }

    #[test]
    fn peek_beyond_end_always_yields_sentinel(
        values in prop::collection::vec(0u32..1000, 0..10),
    ) {
        let mut stream = make_stream(values.clone());
        for _ in 0..values.len() {
            stream.discard();
        }
        prop_assert!(stream.is_finished());
        prop_assert_eq!(stream.peek(5), Item::Eof);
    }
}
