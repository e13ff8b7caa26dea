use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors surfaced synchronously to the caller of a registry or [`Selection`](`crate::Selection`) operation.
///
/// Values thrown by the browser are kept as-is and can be recovered with [`JsValue::from`].
#[derive(Debug, Clone, Error)]
pub enum Error {
	/// The selector was rejected by [***querySelectorAll***](https://developer.mozilla.org/en-US/docs/Web/API/Element/querySelectorAll).
	#[error("invalid selector {selector:?}: {cause:?}")]
	InvalidSelector { selector: String, cause: JsValue },

	/// A subscription or dispatch call threw.
	#[error("DOM call failed: {0:?}")]
	Native(JsValue),
}

impl From<Error> for JsValue {
	fn from(error: Error) -> Self {
		match error {
			Error::InvalidSelector { cause, .. } => cause,
			Error::Native(value) => value,
		}
	}
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
