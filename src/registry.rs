//! Process-wide bookkeeping of which named listeners are attached to which [`Target`].
//!
//! Listeners are cached per target under their full event name (namespace included), so that each can be removed or replayed individually.
//!
//! # Memory
//!
//! Targets are identified through a [`js_sys::WeakMap`] that assigns each an opaque id on first use.
//! Listener closures don't capture their target (they read it from [***Event.currentTarget***](https://developer.mozilla.org/en-US/docs/Web/API/Event/currentTarget)),
//! so this module never keeps a target alive.
//!
//! The Rust side of listeners of a target that's discarded while they are still registered is retained, though.
//! Use [`forget`] before dropping a target you bound listeners to if that matters.

use crate::{
	delegate::{match_delegate, Delegate},
	error::{Error, Result},
	event_name::EventName,
	options::ListenerOptions,
	synthetic_target, Target,
};
use hashbrown::HashMap;
use js_sys::{Function, WeakMap};
use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};
use tracing::{error, instrument, trace, trace_span, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, EventInit, Node};

/// A shared event handler.
///
/// Its second parameter is the [`Target`] the listener is bound to, or, for delegated listeners, the matched [`Element`](`web_sys::Element`).
pub type Handler = Rc<dyn Fn(&Event, &Target)>;

#[derive(Debug)]
struct Listener {
	closure: Closure<dyn Fn(Event)>,
	options: ListenerOptions,
}
impl Listener {
	fn function(&self) -> &Function {
		self.closure.as_ref().unchecked_ref()
	}
}

type EventCache = HashMap<String, Rc<Listener>>;

thread_local! {
	static TARGET_IDS: WeakMap = WeakMap::new();
	static NEXT_TARGET_ID: Cell<u32> = Cell::new(0);
	static EVENT_CACHES: RefCell<HashMap<u32, EventCache>> = RefCell::new(HashMap::new());
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn target_id(target: &Target) -> Option<u32> {
	TARGET_IDS.with(|target_ids| target_ids.get(target.as_object()).as_f64().map(|id| id as u32))
}

fn target_id_or_insert(target: &Target) -> u32 {
	target_id(target).unwrap_or_else(|| {
		let id = NEXT_TARGET_ID.with(|next| {
			let id = next.get();
			next.set(id.wrapping_add(1));
			id
		});
		TARGET_IDS.with(|target_ids| {
			target_ids.set(target.as_object(), &JsValue::from(id));
		});
		trace!("Assigned target id {}.", id);
		id
	})
}

fn cached_listener(target: &Target, event_name: &str) -> Option<Rc<Listener>> {
	let id = target_id(target)?;
	EVENT_CACHES.with(|caches| caches.borrow().get(&id).and_then(|cache| cache.get(event_name)).cloned())
}

fn take_cached_listener(id: u32, event_name: &str) -> Option<Rc<Listener>> {
	EVENT_CACHES.with(|caches| {
		let mut caches = caches.borrow_mut();
		let cache = caches.get_mut(&id)?;
		let listener = cache.remove(event_name);
		if cache.is_empty() {
			caches.remove(&id);
		}
		listener
	})
}

fn attach(target: &Target, base_kind: &str, listener: &Listener) -> Result<()> {
	target
		.event_target()
		.add_event_listener_with_callback_and_add_event_listener_options(base_kind, listener.function(), &listener.options.to_web_options())
		.map_err(Error::Native)
}

fn detach(target: &Target, base_kind: &str, listener: &Listener, capture: bool) -> Result<()> {
	target
		.event_target()
		.remove_event_listener_with_callback_and_bool(base_kind, listener.function(), capture)
		.map_err(Error::Native)
}

/// The delegation origin: the stamped synthetic target for untrusted events that have one, otherwise [***Event.target***](https://developer.mozilla.org/en-US/docs/Web/API/Event/target).
fn origin_of(event: &Event) -> Option<Node> {
	if !event.is_trusted() {
		if let Some(stamped) = synthetic_target::lookup(event) {
			return Some(stamped);
		}
	}
	event.target()?.dyn_into::<Node>().ok()
}

fn listener_body(event_name: String, handler: Handler, delegate: Option<Delegate>) -> impl Fn(Event) {
	move |event: Event| {
		let span = trace_span!("listener", event_name = event_name.as_str(), event_type = event.type_().as_str());
		let _enter = span.enter();

		let target = match event.current_target().and_then(Target::from_event_target) {
			Some(target) => target,
			None => return error!("Listener invoked without a usable `currentTarget`."),
		};

		let delegate = match &delegate {
			Some(delegate) => delegate,
			None => return handler(&event, &target),
		};

		let candidates = match delegate.candidates(&target) {
			Ok(candidates) => candidates,
			Err(error) => return error!("Failed to resolve delegate candidates: {}", error),
		};
		let (container, origin) = match (target.container_node(), origin_of(&event)) {
			(Some(container), Some(origin)) => (container, origin),
			_ => return trace!("No container or origin node, so no delegate can match."),
		};

		match match_delegate(&container, &candidates, &origin) {
			Some(matched) => {
				if cfg!(feature = "dangerous-logging") {
					trace!(?matched, "Delegate matched.");
				} else {
					trace!("Delegate matched.");
				}
				let span = trace_span!("handler");
				let _enter = span.enter();
				handler(&event, &Target::Element(matched));
			}
			None => trace!("None of {} delegate candidate(s) matched.", candidates.len()),
		}
	}
}

/// Attaches `handler` to `target` under `event_name`.
///
/// With a `delegate`, `handler` only runs for events originating at or inside one of the delegate's candidates below `target`,
/// and receives the matched candidate instead of `target`.
///
/// Registering the same `event_name` on the same `target` again replaces the previous listener,
/// which is detached once the new one is attached.
///
/// # Errors
///
/// Iff [***addEventListener***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget/addEventListener) throws.
/// Nothing changes in that case; a previous listener stays attached and cached.
#[instrument(skip(handler))]
pub fn register(target: &Target, event_name: &str, handler: Handler, delegate: Option<Delegate>, options: ListenerOptions) -> Result<()> {
	let name = EventName::parse(event_name);
	let listener = Rc::new(Listener {
		closure: Closure::wrap(Box::new(listener_body(event_name.to_owned(), handler, delegate)) as Box<dyn Fn(Event)>),
		options,
	});

	let id = target_id_or_insert(target);
	attach(target, name.base_kind(), &listener)?;
	trace!("Listener attached.");

	let previous = EVENT_CACHES.with(|caches| caches.borrow_mut().entry(id).or_default().insert(event_name.to_owned(), listener));
	if let Some(previous) = previous {
		trace!("Replaced listener.");
		if let Err(error) = detach(target, name.base_kind(), &previous, previous.options.capture()) {
			warn!("Failed to detach replaced listener: {}", error);
		}
	}
	Ok(())
}

/// Detaches the listener cached under exactly `event_name`, if there is one.
///
/// As with [***removeEventListener***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget/removeEventListener),
/// `options` must have the [`capture`](`ListenerOptions::capture`) flag the listener was registered with.
/// Otherwise nothing happens and the listener stays active.
///
/// # Errors
///
/// Iff [***removeEventListener***](https://developer.mozilla.org/en-US/docs/Web/API/EventTarget/removeEventListener) throws.
#[instrument]
pub fn unregister(target: &Target, event_name: &str, options: ListenerOptions) -> Result<()> {
	let id = match target_id(target) {
		Some(id) => id,
		None => return Ok(()),
	};
	let listener = match cached_listener(target, event_name) {
		Some(listener) => listener,
		None => {
			trace!("No such listener.");
			return Ok(());
		}
	};

	if listener.options.capture() != options.capture() {
		warn!(
			"Not detaching listener {:?}: It was registered with capture = {}, but capture = {} was requested.",
			event_name,
			listener.options.capture(),
			options.capture()
		);
		return Ok(());
	}

	detach(target, EventName::parse(event_name).base_kind(), &listener, options.capture())?;
	drop(take_cached_listener(id, event_name));
	trace!("Listener detached.");
	Ok(())
}

/// Detaches all listeners registered on `target` and discards its cache.
#[instrument]
pub fn forget(target: &Target) {
	let id = match target_id(target) {
		Some(id) => id,
		None => return,
	};
	let cache = EVENT_CACHES.with(|caches| caches.borrow_mut().remove(&id)).unwrap_or_default();
	trace!("Forgetting {} listener(s).", cache.len());
	for (event_name, listener) in cache {
		if let Err(error) = detach(target, EventName::parse(&event_name).base_kind(), &listener, listener.options.capture()) {
			warn!("Failed to detach listener {:?}: {}", event_name, error);
		}
	}
}

/// Whether a listener is currently cached under exactly `event_name` for `target`.
#[must_use]
pub fn has_listener(target: &Target, event_name: &str) -> bool {
	cached_listener(target, event_name).is_some()
}

/// Dispatches `event_name` on `target`.
///
/// - With a `delegate` that currently has no candidates below `target`, nothing happens.
/// - For a namespaced name with a listener cached under exactly that name, only that listener runs, once.
///   The event it receives has the full name as its type, and is attributed to the first delegate candidate if there is one.
/// - Otherwise, a bubbling event of the base kind is dispatched normally,
///   also attributed to the first delegate candidate if there is one.
///
/// # Errors
///
/// Iff the delegate selector is invalid or the DOM throws.
#[instrument]
pub fn trigger(target: &Target, event_name: &str, delegate: Option<&Delegate>, options: ListenerOptions) -> Result<()> {
	let name = EventName::parse(event_name);

	let stamped_origin = match delegate {
		Some(delegate) => match delegate.candidates(target)?.into_iter().next() {
			Some(first) => Some(Node::from(first)),
			None => {
				trace!("No delegate candidates; not triggering.");
				return Ok(());
			}
		},
		None => None,
	};

	if name.namespace().is_some() {
		if let Some(listener) = cached_listener(target, event_name) {
			return replay(target, name, &listener, stamped_origin, options);
		}
	}

	let event_init = EventInit::new();
	event_init.set_bubbles(true);
	let event = Event::new_with_event_init_dict(name.base_kind(), &event_init).map_err(Error::Native)?;
	let _stamp = stamped_origin.map(|origin| synthetic_target::stamp(&event, origin));
	trace!("Dispatching {:?}.", name.base_kind());
	target.event_target().dispatch_event(&event).map_err(Error::Native)?;
	Ok(())
}

/// Subscribes `listener` to an event type nothing else listens to, dispatches it and unsubscribes again.
fn replay(target: &Target, name: EventName<'_>, listener: &Rc<Listener>, stamped_origin: Option<Node>, options: ListenerOptions) -> Result<()> {
	let event = Event::new(name.full()).map_err(Error::Native)?;
	let _stamp = stamped_origin.map(|origin| synthetic_target::stamp(&event, origin));

	let event_target = target.event_target();
	event_target
		.add_event_listener_with_callback_and_bool(name.full(), listener.function(), options.capture())
		.map_err(Error::Native)?;
	trace!("Replaying cached listener.");
	let dispatched = event_target.dispatch_event(&event);
	let removed = event_target.remove_event_listener_with_callback_and_bool(name.full(), listener.function(), options.capture());

	dispatched.map_err(Error::Native)?;
	removed.map_err(Error::Native)
}
