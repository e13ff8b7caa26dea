use std::cell::RefCell;
use tracing::trace;
use web_sys::{Event, Node};

thread_local! {
	// A stack, since handlers may trigger further events during a dispatch.
	static STAMPS: RefCell<Vec<(Event, Node)>> = RefCell::new(Vec::new());
}

/// Attributes `event` to `origin` for delegation purposes until the returned guard is dropped.
///
/// Only consulted for untrusted events, so a real user interaction can't be redirected this way.
pub(crate) fn stamp(event: &Event, origin: Node) -> impl Drop {
	STAMPS.with(|stamps| stamps.borrow_mut().push((event.clone(), origin)));
	trace!("Stamped synthetic target.");

	struct Guard(Event);
	impl Drop for Guard {
		fn drop(&mut self) {
			STAMPS.with(|stamps| {
				let mut stamps = stamps.borrow_mut();
				if let Some(i) = stamps.iter().rposition(|(event, _)| event == &self.0) {
					stamps.remove(i);
				}
			});
			trace!("Cleared synthetic target.");
		}
	}
	Guard(event.clone())
}

pub(crate) fn lookup(event: &Event) -> Option<Node> {
	STAMPS.with(|stamps| stamps.borrow().iter().rev().find(|(stamped, _)| stamped == event).map(|(_, origin)| origin.clone()))
}
