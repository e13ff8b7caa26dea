use crate::error::{Error, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Node, NodeList, Window};

/// Anything events can be bound to and dispatched on.
///
/// Equality is JavaScript identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
	Element(Element),
	Document(Document),
	Window(Window),
}
impl Target {
	/// Recovers a [`Target`] from e.g. [***Event.currentTarget***](https://developer.mozilla.org/en-US/docs/Web/API/Event/currentTarget).
	///
	/// Returns [`None`] for [***EventTarget***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget)s that are neither.
	#[must_use]
	pub fn from_event_target(event_target: EventTarget) -> Option<Self> {
		let event_target = match event_target.dyn_into::<Element>() {
			Ok(element) => return Some(Self::Element(element)),
			Err(event_target) => event_target,
		};
		let event_target = match event_target.dyn_into::<Document>() {
			Ok(document) => return Some(Self::Document(document)),
			Err(event_target) => event_target,
		};
		event_target.dyn_into::<Window>().ok().map(Self::Window)
	}

	#[must_use]
	pub fn event_target(&self) -> &EventTarget {
		match self {
			Self::Element(element) => element.as_ref(),
			Self::Document(document) => document.as_ref(),
			Self::Window(window) => window.as_ref(),
		}
	}

	#[must_use]
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			Self::Document(_) | Self::Window(_) => None,
		}
	}

	pub(crate) fn as_object(&self) -> &js_sys::Object {
		match self {
			Self::Element(element) => element.as_ref(),
			Self::Document(document) => document.as_ref(),
			Self::Window(window) => window.as_ref(),
		}
	}

	/// The node delegated event origins must stay inside of.
	///
	/// For a [`Window`], that's its document.
	#[must_use]
	pub fn container_node(&self) -> Option<Node> {
		match self {
			Self::Element(element) => Some(element.clone().into()),
			Self::Document(document) => Some(document.clone().into()),
			Self::Window(window) => window.document().map(Into::into),
		}
	}

	/// Runs [***querySelectorAll***](https://developer.mozilla.org/en-US/docs/Web/API/Element/querySelectorAll) below this target.
	///
	/// A [`Window`] is searched through its document's body, or the document itself if there is no body yet.
	///
	/// # Errors
	///
	/// Iff `selector` is invalid.
	pub fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
		let node_list = match self {
			Self::Element(element) => element.query_selector_all(selector),
			Self::Document(document) => document.query_selector_all(selector),
			Self::Window(window) => match window.document() {
				Some(document) => match document.body() {
					Some(body) => body.query_selector_all(selector),
					None => document.query_selector_all(selector),
				},
				None => return Ok(Vec::new()),
			},
		}
		.map_err(|cause| Error::InvalidSelector {
			selector: selector.to_owned(),
			cause,
		})?;
		Ok(elements_of(&node_list))
	}

	/// Runs [***querySelector***](https://developer.mozilla.org/en-US/docs/Web/API/Element/querySelector) below this target.
	///
	/// # Errors
	///
	/// Iff `selector` is invalid.
	pub fn query_one(&self, selector: &str) -> Result<Option<Element>> {
		match self {
			Self::Element(element) => element.query_selector(selector),
			Self::Document(document) => document.query_selector(selector),
			Self::Window(window) => match window.document() {
				Some(document) => match document.body() {
					Some(body) => body.query_selector(selector),
					None => document.query_selector(selector),
				},
				None => return Ok(None),
			},
		}
		.map_err(|cause| Error::InvalidSelector {
			selector: selector.to_owned(),
			cause,
		})
	}
}

fn elements_of(node_list: &NodeList) -> Vec<Element> {
	(0..node_list.length())
		.filter_map(|i| node_list.item(i))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

impl From<Element> for Target {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<HtmlElement> for Target {
	fn from(html_element: HtmlElement) -> Self {
		Self::Element(html_element.into())
	}
}

impl From<Document> for Target {
	fn from(document: Document) -> Self {
		Self::Document(document)
	}
}

impl From<Window> for Target {
	fn from(window: Window) -> Self {
		Self::Window(window)
	}
}
