//! Interceptor candidates and the ordering hints attached to them.

use std::sync::Arc;

use crate::error::HintError;
use crate::order::InterceptorOrder;

/// Capability for interceptors that know their own order.
///
/// The reported value is the weakest explicit signal: it only applies when the
/// candidate carries neither an explicit order nor a priority.
pub trait Ordered {
	/// Order value reported by the instance.
	fn order(&self) -> i32;
}

/// Which ordering source a hint came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintKind {
	/// Explicit order declaration.
	Explicit,
	/// Priority declaration.
	Priority,
	/// Value reported through [`Ordered`].
	Capability,
}

impl core::fmt::Display for HintKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(match self {
			Self::Explicit => "order",
			Self::Priority => "priority",
			Self::Capability => "capability order",
		})
	}
}

/// A single ordering hint.
///
/// Typed values come from code; wide integers and text come from configuration
/// and are only checked when the chain is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderHint {
	/// Already-typed order value.
	Value(i32),
	/// Integer that may not fit the order range.
	Integer(i64),
	/// Decimal literal or named order (see [`InterceptorOrder::from_name`]).
	Text(Box<str>),
}

impl OrderHint {
	/// Parses the hint into an order value.
	pub fn value(&self) -> Result<i32, HintError> {
		match self {
			Self::Value(v) => Ok(*v),
			Self::Integer(v) => i32::try_from(*v).map_err(|_| HintError::OutOfRange { value: *v }),
			Self::Text(text) => parse_text(text),
		}
	}
}

fn parse_text(text: &str) -> Result<i32, HintError> {
	let trimmed = text.trim();
	if let Ok(wide) = trimmed.parse::<i64>() {
		return i32::try_from(wide).map_err(|_| HintError::OutOfRange { value: wide });
	}
	if let Some(named) = InterceptorOrder::from_name(trimmed) {
		return Ok(named.value());
	}
	// Digits that overflow even i64 are still out of range, not garbage.
	let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
	if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
		return Err(HintError::Overflow {
			value: Box::from(trimmed),
		});
	}
	Err(HintError::NotNumeric {
		value: Box::from(text),
	})
}

impl From<i32> for OrderHint {
	fn from(value: i32) -> Self {
		Self::Value(value)
	}
}

impl From<InterceptorOrder> for OrderHint {
	fn from(value: InterceptorOrder) -> Self {
		Self::Value(value.value())
	}
}

impl From<&str> for OrderHint {
	fn from(value: &str) -> Self {
		Self::Text(Box::from(value))
	}
}

impl core::fmt::Display for OrderHint {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Value(v) => write!(f, "{v}"),
			Self::Integer(v) => write!(f, "{v}"),
			Self::Text(text) => write!(f, "{text:?}"),
		}
	}
}

/// Ordering metadata for one candidate. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrderHints {
	/// Explicit order declaration.
	pub explicit_order: Option<OrderHint>,
	/// Priority declaration.
	pub priority: Option<OrderHint>,
	/// Order reported by the interceptor itself.
	pub capability_order: Option<OrderHint>,
}

impl OrderHints {
	/// Hints with nothing set.
	pub const NONE: Self = Self {
		explicit_order: None,
		priority: None,
		capability_order: None,
	};

	/// Returns the hint of the given kind, if present.
	pub fn get(&self, kind: HintKind) -> Option<&OrderHint> {
		match kind {
			HintKind::Explicit => self.explicit_order.as_ref(),
			HintKind::Priority => self.priority.as_ref(),
			HintKind::Capability => self.capability_order.as_ref(),
		}
	}

	/// Sets or clears the hint of the given kind.
	pub fn set(&mut self, kind: HintKind, hint: Option<OrderHint>) {
		let slot = match kind {
			HintKind::Explicit => &mut self.explicit_order,
			HintKind::Priority => &mut self.priority,
			HintKind::Capability => &mut self.capability_order,
		};
		*slot = hint;
	}

	/// True when no source is present.
	pub fn is_empty(&self) -> bool {
		self.explicit_order.is_none() && self.priority.is_none() && self.capability_order.is_none()
	}
}

/// An interceptor waiting to be ordered.
pub struct Candidate<I: ?Sized> {
	name: Box<str>,
	interceptor: Arc<I>,
	hints: OrderHints,
}

impl<I: ?Sized> Clone for Candidate<I> {
	fn clone(&self) -> Self {
		Self {
			name: self.name.clone(),
			interceptor: Arc::clone(&self.interceptor),
			hints: self.hints.clone(),
		}
	}
}

impl<I: ?Sized> core::fmt::Debug for Candidate<I> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Candidate")
			.field("name", &self.name)
			.field("hints", &self.hints)
			.finish_non_exhaustive()
	}
}

impl<I: ?Sized> Candidate<I> {
	/// Candidate with no ordering hints.
	pub fn new(name: impl Into<Box<str>>, interceptor: Arc<I>) -> Self {
		Self::with_hints(name, interceptor, OrderHints::NONE)
	}

	/// Candidate with the given hints.
	pub fn with_hints(name: impl Into<Box<str>>, interceptor: Arc<I>, hints: OrderHints) -> Self {
		Self {
			name: name.into(),
			interceptor,
			hints,
		}
	}

	/// Identifying name, used for lookup and diagnostics only.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Shared interceptor instance.
	pub fn interceptor(&self) -> &Arc<I> {
		&self.interceptor
	}

	/// Ordering hints.
	pub fn hints(&self) -> &OrderHints {
		&self.hints
	}

	pub(crate) fn hints_mut(&mut self) -> &mut OrderHints {
		&mut self.hints
	}

	/// Builder-style explicit order.
	#[must_use]
	pub fn order(mut self, order: impl Into<OrderHint>) -> Self {
		self.hints.explicit_order = Some(order.into());
		self
	}

	/// Builder-style priority.
	#[must_use]
	pub fn priority(mut self, priority: impl Into<OrderHint>) -> Self {
		self.hints.priority = Some(priority.into());
		self
	}

	/// Builder-style capability order.
	#[must_use]
	pub fn capability_order(mut self, order: impl Into<OrderHint>) -> Self {
		self.hints.capability_order = Some(order.into());
		self
	}
}

impl<I: Ordered + ?Sized> Candidate<I> {
	/// Candidate whose capability order is read from the instance.
	pub fn ordered(name: impl Into<Box<str>>, interceptor: Arc<I>) -> Self {
		let order = interceptor.order();
		Self::new(name, interceptor).capability_order(order)
	}
}
