#![doc(html_root_url = "https://docs.rs/base-elem/0.0.1")]
#![warn(clippy::pedantic)]
//! Namespaced, delegated and synthetic DOM event listeners.
//!
//! Listeners are registered per [`Target`] under a full event name like `"click.menu"`,
//! so several handlers for the same kind of event can be removed or replayed one at a time.
//!
//! See [`Selection`] for a chainable way to do this over many targets at once,
//! and the free functions re-exported here to work with a single target.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod delegate;
mod error;
pub mod event_name;
mod options;
pub mod registry;
mod selection;
mod synthetic_target;
mod target;

pub use delegate::{match_delegate, Delegate};
pub use error::{Error, Result};
pub use event_name::EventName;
pub use options::ListenerOptions;
pub use registry::{forget, has_listener, register, trigger, unregister as off, unregister, Handler};
pub use selection::{EventNames, Selection};
pub use target::Target;

use std::rc::Rc;
use web_sys::Event;

/// Registers a plain closure on a single `target`.
///
/// See [`register`].
///
/// # Errors
///
/// Iff [***addEventListener***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget/addEventListener) throws.
pub fn on(target: &Target, event_name: &str, handler: impl 'static + Fn(&Event, &Target), delegate: Option<Delegate>, options: impl Into<ListenerOptions>) -> Result<()> {
	register(target, event_name, Rc::new(handler), delegate, options.into())
}
