//! Parsing of event names like `"click"`, `"click.menu"` and `"[opened].menu"`.

use core::fmt::{self, Display, Formatter};

/// A borrowed, parsed event name.
///
/// The **base kind** is what's actually subscribed to on the [***EventTarget***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget):
/// everything before the first `.`, or the whole bracketed literal for synthetic names (dots inside the brackets don't split).
///
/// The full string, namespace included, is the key a listener is cached and later removed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventName<'a> {
	full: &'a str,
	base_kind_len: usize,
}
impl<'a> EventName<'a> {
	#[must_use]
	pub fn parse(full: &'a str) -> Self {
		let search_from = if full.starts_with('[') { full.find(']').map_or(0, |i| i + 1) } else { 0 };
		let base_kind_len = full[search_from..].find('.').map_or(full.len(), |i| search_from + i);
		Self { full, base_kind_len }
	}

	#[must_use]
	pub fn full(&self) -> &'a str {
		self.full
	}

	#[must_use]
	pub fn base_kind(&self) -> &'a str {
		&self.full[..self.base_kind_len]
	}

	/// The part after the separating `.`, if it isn't empty.
	#[must_use]
	pub fn namespace(&self) -> Option<&'a str> {
		self.full.get(self.base_kind_len + 1..).filter(|namespace| !namespace.is_empty())
	}

	/// Whether this names an application-defined event like `"[opened]"`, which the browser never fires by itself.
	#[must_use]
	pub fn is_synthetic(&self) -> bool {
		let base_kind = self.base_kind();
		base_kind.len() >= 2 && base_kind.starts_with('[') && base_kind.ends_with(']')
	}
}

impl Display for EventName<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.full)
	}
}

impl<'a> From<&'a str> for EventName<'a> {
	fn from(full: &'a str) -> Self {
		Self::parse(full)
	}
}
