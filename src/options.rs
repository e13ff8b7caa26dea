use std::cell::RefCell;
use wasm_bindgen::UnwrapThrowExt;

/// Flags passed along to [***addEventListener***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget/addEventListener).
///
/// Only [`capture`](`ListenerOptions::capture`) takes part in matching a listener for removal,
/// the same as with the native API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ListenerOptions {
	capture: bool,
	once: bool,
	passive: bool,
}
impl ListenerOptions {
	#[must_use]
	pub const fn new() -> Self {
		Self {
			capture: false,
			once: false,
			passive: false,
		}
	}

	#[must_use]
	pub const fn with_capture(self, capture: bool) -> Self {
		Self { capture, ..self }
	}

	#[must_use]
	pub const fn with_once(self, once: bool) -> Self {
		Self { once, ..self }
	}

	#[must_use]
	pub const fn with_passive(self, passive: bool) -> Self {
		Self { passive, ..self }
	}

	#[must_use]
	pub const fn capture(self) -> bool {
		self.capture
	}

	#[must_use]
	pub const fn once(self) -> bool {
		self.once
	}

	#[must_use]
	pub const fn passive(self) -> bool {
		self.passive
	}

	fn cache_index(self) -> usize {
		self.capture as usize + self.once as usize * 2 + self.passive as usize * 4
	}

	/// Retrieves the matching [`web_sys::AddEventListenerOptions`], creating it only once per flag combination.
	pub(crate) fn to_web_options(self) -> web_sys::AddEventListenerOptions {
		thread_local! {
			static ADD_EVENT_LISTENER_OPTIONS_CACHE: RefCell<[Option<web_sys::AddEventListenerOptions>; 8]> =
				RefCell::new([None, None, None, None, None, None, None, None]);
		}

		ADD_EVENT_LISTENER_OPTIONS_CACHE.with(|cache| {
			let mut cache = cache.borrow_mut();
			let entry = cache.get_mut(self.cache_index()).unwrap_throw();
			entry
				.get_or_insert_with(|| {
					let web_options = web_sys::AddEventListenerOptions::new();
					web_options.set_capture(self.capture);
					web_options.set_once(self.once);
					web_options.set_passive(self.passive);
					web_options
				})
				.clone()
		})
	}
}

/// `true` is shorthand for capturing, as with the native API.
impl From<bool> for ListenerOptions {
	fn from(capture: bool) -> Self {
		Self::new().with_capture(capture)
	}
}

#[cfg(test)]
mod tests {
	use super::ListenerOptions;

	#[test]
	fn cache_indices_are_distinct() {
		let mut seen = [false; 8];
		for &capture in &[false, true] {
			for &once in &[false, true] {
				for &passive in &[false, true] {
					let index = ListenerOptions::new().with_capture(capture).with_once(once).with_passive(passive).cache_index();
					assert!(!seen[index]);
					seen[index] = true;
				}
			}
		}
	}

	#[test]
	fn bool_shorthand() {
		assert!(ListenerOptions::from(true).capture());
		assert_eq!(ListenerOptions::from(false), ListenerOptions::default());
	}
}
