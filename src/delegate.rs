//! Attributing events to descendant "root" elements of the element a listener is bound to.

use crate::{error::Result, Target};
use web_sys::{Element, Node};

/// Which descendants of a bound [`Target`] a delegated listener responds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delegate {
	/// Queried below the target each time it's needed, so elements added later are included.
	Selector(String),
	/// A fixed list, used as given.
	Elements(Vec<Element>),
}
impl Delegate {
	/// Resolves the current candidate list below `container`, in document order for selectors.
	///
	/// # Errors
	///
	/// Iff the selector is invalid.
	pub fn candidates(&self, container: &Target) -> Result<Vec<Element>> {
		match self {
			Self::Selector(selector) => container.query_all(selector),
			Self::Elements(elements) => Ok(elements.clone()),
		}
	}
}

impl From<&str> for Delegate {
	fn from(selector: &str) -> Self {
		Self::Selector(selector.to_owned())
	}
}

impl From<String> for Delegate {
	fn from(selector: String) -> Self {
		Self::Selector(selector)
	}
}

impl From<Vec<Element>> for Delegate {
	fn from(elements: Vec<Element>) -> Self {
		Self::Elements(elements)
	}
}

impl From<&[Element]> for Delegate {
	fn from(elements: &[Element]) -> Self {
		Self::Elements(elements.to_vec())
	}
}

/// Returns the candidate that is `origin` or its closest ancestor, without walking past `container`.
///
/// Nested candidates therefore resolve to the innermost one around `origin`.
/// If `candidates` contains the same element more than once, the first entry is returned.
#[must_use]
pub fn match_delegate(container: &Node, candidates: &[Element], origin: &Node) -> Option<Element> {
	let mut current = Some(origin.clone());
	while let Some(node) = current {
		if let Some(candidate) = candidates.iter().find(|&candidate| AsRef::<Node>::as_ref(candidate) == &node) {
			return Some(candidate.clone());
		}
		if &node == container {
			return None;
		}
		current = node.parent_node();
	}
	None
}
