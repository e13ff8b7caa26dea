use crate::{
	delegate::Delegate,
	error::{Error, Result},
	options::ListenerOptions,
	registry::{self, Handler},
	Target,
};
use std::{iter::FromIterator, rc::Rc, slice, vec};
use tracing::{instrument, warn};
use web_sys::{Element, Event};

/// One or several event names, as accepted by [`Selection::on`] and [`Selection::off`].
pub trait EventNames {
	fn event_names(&self) -> Vec<&str>;
}
impl EventNames for str {
	fn event_names(&self) -> Vec<&str> {
		vec![self]
	}
}
impl EventNames for String {
	fn event_names(&self) -> Vec<&str> {
		vec![self.as_str()]
	}
}
impl<S: AsRef<str>> EventNames for [S] {
	fn event_names(&self) -> Vec<&str> {
		self.iter().map(AsRef::as_ref).collect()
	}
}
impl<S: AsRef<str>, const N: usize> EventNames for [S; N] {
	fn event_names(&self) -> Vec<&str> {
		self.iter().map(AsRef::as_ref).collect()
	}
}
impl<S: AsRef<str>> EventNames for Vec<S> {
	fn event_names(&self) -> Vec<&str> {
		self.iter().map(AsRef::as_ref).collect()
	}
}

/// An ordered list of [`Target`]s that event operations fan out over.
///
/// Event operations ([`on`](`Selection::on`), [`off`](`Selection::off`), [`trigger`](`Selection::trigger`), [`each`](`Selection::each`))
/// return the same instance for chaining.
/// Narrowing operations ([`find`](`Selection::find`), [`filter`](`Selection::filter`) etc.) return a new [`Selection`] and leave this one unchanged.
///
/// Cloning is shallow: the clone has its own list, but the targets are the same DOM objects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
	targets: Vec<Target>,
}
impl Selection {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Selects all elements in the current document matching `selector`, in document order.
	///
	/// # Errors
	///
	/// Iff `selector` is invalid.
	#[instrument]
	pub fn select(selector: &str) -> Result<Self> {
		match web_sys::window().and_then(|window| window.document()) {
			Some(document) => Self::select_in(selector, &Target::Document(document)),
			None => {
				warn!("No document to select from.");
				Ok(Self::new())
			}
		}
	}

	/// Selects all elements below `base` matching `selector`, in document order.
	///
	/// # Errors
	///
	/// Iff `selector` is invalid.
	pub fn select_in(selector: &str, base: &Target) -> Result<Self> {
		Ok(base.query_all(selector)?.into_iter().map(Target::Element).collect())
	}

	/// Wraps `targets` as given, without sorting or deduplicating.
	pub fn from_targets<I, T>(targets: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Target>,
	{
		targets.into_iter().map(Into::into).collect()
	}

	// Events:

	/// Registers `handler` under each of `names` on each target.
	///
	/// See [`registry::register`].
	///
	/// # Errors
	///
	/// On the first failed registration. Earlier ones stay in place.
	#[instrument(skip(names, handler, options))]
	pub fn on<N>(&self, names: &N, handler: impl 'static + Fn(&Event, &Target), delegate: Option<Delegate>, options: impl Into<ListenerOptions>) -> Result<&Self>
	where
		N: EventNames + ?Sized,
	{
		let handler: Handler = Rc::new(handler);
		let options = options.into();
		for name in names.event_names() {
			for target in &self.targets {
				registry::register(target, name, Rc::clone(&handler), delegate.clone(), options)?;
			}
		}
		Ok(self)
	}

	/// Removes the listeners registered under each of `names` from each target.
	///
	/// See [`registry::unregister`].
	///
	/// # Errors
	///
	/// On the first failed removal.
	#[instrument(skip(names, options))]
	pub fn off<N>(&self, names: &N, options: impl Into<ListenerOptions>) -> Result<&Self>
	where
		N: EventNames + ?Sized,
	{
		let options = options.into();
		for name in names.event_names() {
			for target in &self.targets {
				registry::unregister(target, name, options)?;
			}
		}
		Ok(self)
	}

	/// Triggers `name` on each target, optionally attributed to the first match of `delegate` below it.
	///
	/// See [`registry::trigger`].
	///
	/// # Errors
	///
	/// Iff `delegate` is invalid or the DOM throws.
	#[instrument]
	pub fn trigger(&self, name: &str, delegate: Option<&str>) -> Result<&Self> {
		let delegate = delegate.map(Delegate::from);
		for target in &self.targets {
			registry::trigger(target, name, delegate.as_ref(), ListenerOptions::new())?;
		}
		Ok(self)
	}

	/// Calls `f` with each target and its index, in order.
	pub fn each(&self, mut f: impl FnMut(&Target, usize)) -> &Self {
		for (i, target) in self.targets.iter().enumerate() {
			f(target, i);
		}
		self
	}

	// Narrowing:

	/// All elements matching `selector` below each target, concatenated in target order.
	///
	/// # Errors
	///
	/// Iff `selector` is invalid.
	pub fn find(&self, selector: &str) -> Result<Self> {
		let mut found = Vec::new();
		for target in &self.targets {
			found.extend(target.query_all(selector)?.into_iter().map(Target::Element));
		}
		Ok(Self { targets: found })
	}

	/// The first element matching `selector` below each target, for targets that have one.
	///
	/// # Errors
	///
	/// Iff `selector` is invalid.
	pub fn find_one(&self, selector: &str) -> Result<Self> {
		let mut found = Vec::new();
		for target in &self.targets {
			found.extend(target.query_one(selector)?.map(Target::Element));
		}
		Ok(Self { targets: found })
	}

	/// Maps each target to at most one other, skipping repeats.
	///
	/// Useful to navigate to parents or siblings.
	#[must_use]
	pub fn find_map(&self, f: impl FnMut(&Target, usize) -> Option<Target>) -> Self {
		self.map(f, true).into()
	}

	/// Ancestors of the selected elements that match `selector`.
	///
	/// Without `until`, that's the closest matching ancestor of each element.
	/// With `until`, it's every matching ancestor up to and including the first ancestor matching `until`, outermost first.
	///
	/// Repeats are skipped. Targets that aren't elements contribute nothing.
	///
	/// # Errors
	///
	/// Iff `selector` or `until` is invalid.
	pub fn parents(&self, selector: &str, until: Option<&str>) -> Result<Self> {
		let mut found: Vec<Target> = Vec::new();
		for element in self.targets.iter().filter_map(Target::as_element) {
			let mut matched = Vec::new();
			let mut ancestor = element.parent_element();
			while let Some(current) = ancestor {
				if matches(&current, selector)? {
					matched.push(current.clone());
					if until.is_none() {
						break;
					}
				}
				if let Some(until) = until {
					if matches(&current, until)? {
						break;
					}
				}
				ancestor = current.parent_element();
			}

			for parent in matched.into_iter().rev().map(Target::Element) {
				if !found.contains(&parent) {
					found.push(parent);
				}
			}
		}
		Ok(Self { targets: found })
	}

	#[must_use]
	pub fn filter(&self, mut predicate: impl FnMut(&Target, usize) -> bool) -> Self {
		self.targets.iter().enumerate().filter(|&(i, target)| predicate(target, i)).map(|(_, target)| target.clone()).collect()
	}

	/// The target at `index`, as its own [`Selection`].
	///
	/// Logs a warning if there is none.
	#[must_use]
	pub fn get(&self, index: usize) -> Option<Self> {
		match self.targets.get(index) {
			Some(target) => Some(target.clone().into()),
			None => {
				warn!("No target at index {} (of {}).", index, self.targets.len());
				None
			}
		}
	}

	// Access:

	/// Calls `f` with each target and its index, keeping [`Some`] results.
	///
	/// With `unique`, results equal to one already kept are skipped.
	pub fn map<T: PartialEq>(&self, mut f: impl FnMut(&Target, usize) -> Option<T>, unique: bool) -> Vec<T> {
		let mut mapped = Vec::with_capacity(self.targets.len());
		for (i, target) in self.targets.iter().enumerate() {
			if let Some(value) = f(target, i) {
				if !unique || !mapped.contains(&value) {
					mapped.push(value)
				}
			}
		}
		mapped
	}

	#[must_use]
	pub fn to_vec(&self) -> Vec<Target> {
		self.targets.clone()
	}

	#[must_use]
	pub fn targets(&self) -> &[Target] {
		&self.targets
	}

	pub fn iter(&self) -> slice::Iter<'_, Target> {
		self.targets.iter()
	}

	#[must_use]
	pub fn first(&self) -> Option<&Target> {
		self.targets.first()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.targets.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.targets.is_empty()
	}

	/// Whether any target is an element, rather than a document or window.
	#[must_use]
	pub fn has_elements(&self) -> bool {
		self.targets.iter().any(|target| target.as_element().is_some())
	}
}

fn matches(element: &Element, selector: &str) -> Result<bool> {
	element.matches(selector).map_err(|cause| Error::InvalidSelector {
		selector: selector.to_owned(),
		cause,
	})
}

impl From<Target> for Selection {
	fn from(target: Target) -> Self {
		Self { targets: vec![target] }
	}
}

impl From<Vec<Target>> for Selection {
	fn from(targets: Vec<Target>) -> Self {
		Self { targets }
	}
}

impl FromIterator<Target> for Selection {
	fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
		Self { targets: iter.into_iter().collect() }
	}
}

impl IntoIterator for Selection {
	type Item = Target;
	type IntoIter = vec::IntoIter<Target>;

	fn into_iter(self) -> Self::IntoIter {
		self.targets.into_iter()
	}
}

impl<'a> IntoIterator for &'a Selection {
	type Item = &'a Target;
	type IntoIter = slice::Iter<'a, Target>;

	fn into_iter(self) -> Self::IntoIter {
		self.targets.iter()
	}
}
