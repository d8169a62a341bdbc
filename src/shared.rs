//------------------------------------------------------------------------------
//
// Copyright 2025 Jiri Bobek. All rights reserved.
// License: GPL 3.0 or later. See LICENSE.txt for details.
//
//------------------------------------------------------------------------------

//! This is my implementation of a shared-ownership handle. It is like `Rc`,
//! except that a handle can also be empty, and the payload and the counter
//! live in two separate allocations. The split layout is what lets
//! `Shared<dyn Trait>` work on stable Rust: we only ever unsize a `Box<T>`,
//! never a combined inner struct.
//!
//! The counter is a plain `Cell<usize>`. No atomics, no weak references.
//! `Shared` is `!Send` and `!Sync`, which falls out of `NonNull`.

use std::cell::Cell;
use std::ops::Deref;
use std::ptr::NonNull;

#[cold]
fn cold_path() {}

//--------------------------------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct EmptyHandleError;

impl std::error::Error for EmptyHandleError {}

impl std::fmt::Display for EmptyHandleError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Cannot access the payload of an empty handle")
	}
}

//--------------------------------------------------------------------------------------------------

/// The two pointers every member of a group shares.
///
/// Keeping them in one struct makes "both present or both absent" structural.
/// A handle stores `Option<Group<T>>`; `None` is the empty handle.
struct Group<T: ?Sized> {
	count: NonNull<Cell<usize>>,
	value: NonNull<T>,
}

// Manual impls. Derives would put a `T: Clone` / `T: Copy` bound on them.
impl<T: ?Sized> Clone for Group<T> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: ?Sized> Copy for Group<T> {}

//--------------------------------------------------------------------------------------------------

/// A reference-counted handle to a heap-allocated `T`.
///
/// All handles cloned from one another form a group. The group shares one
/// payload and one counter, and the counter always equals the number of live
/// handles in the group. The payload and the counter are deallocated by
/// whichever handle observes the counter reaching zero, so the group's
/// lifetime is the lifetime of its longest-lived member.
///
/// Move semantics come from Rust itself: `let b = a;` transfers group
/// membership without touching the counter, and `a = b;` first releases
/// whatever `a` held. The one thing the language cannot express is moving out
/// of a handle you still need to name afterwards; that is [`Shared::take`].
pub struct Shared<T: ?Sized> {
	group: Option<Group<T>>,
}

impl<T: ?Sized> Shared<T> {
	/// Wraps `value` in a new group of size 1.
	pub fn new(value: T) -> Self
	where
		T: Sized,
	{
		Self::from_box(Box::new(value))
	}

	/// Takes over an existing allocation.
	///
	/// This is also the entry point for unsized payloads:
	/// `Shared::<dyn Trait>::from_box(Box::new(concrete))`.
	pub fn from_box(value: Box<T>) -> Self {
		let value = NonNull::from(Box::leak(value));
		let count = NonNull::from(Box::leak(Box::new(Cell::new(1_usize))));
		log::trace!("shared handle created, count: 1");
		Self { group: Some(Group { count, value }) }
	}

	/// A handle that belongs to no group. Destroying it is a no-op.
	pub const fn empty() -> Self {
		Self { group: None }
	}

	pub fn is_empty(&self) -> bool {
		self.group.is_none()
	}

	/// Number of live handles in this handle's group. 0 for an empty handle.
	pub fn ref_count(&self) -> usize {
		match self.group {
			Some(group) => unsafe { group.count.as_ref() }.get(),
			None => 0,
		}
	}

	pub fn is_unique(&self) -> bool {
		self.ref_count() == 1
	}

	pub fn get(&self) -> Option<&T> {
		self.group.map(|group| unsafe { group.value.as_ref() })
	}

	pub fn try_get(&self) -> Result<&T, EmptyHandleError> {
		self.get().ok_or(EmptyHandleError)
	}

	/// Mutable access to the payload. Only allowed when this handle is the
	/// sole member of its group, so no other handle can observe the change
	/// while it happens.
	pub fn get_mut(&mut self) -> Option<&mut T> {
		match self.group {
			Some(mut group) if self.is_unique() => Some(unsafe { group.value.as_mut() }),
			_ => None,
		}
	}

	pub fn as_ptr(&self) -> Option<NonNull<T>> {
		self.group.map(|group| group.value)
	}

	/// True when both handles are members of the same group.
	///
	/// Two empty handles are not considered equal. They share no allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		match (self.group, other.group) {
			(Some(a), Some(b)) => a.count == b.count,
			_ => false,
		}
	}

	/// Moves the group membership out of `self`, leaving it empty.
	///
	/// The counter is not touched. Afterwards `self` behaves exactly like a
	/// freshly constructed empty handle, so dropping it or assigning over it
	/// performs no release.
	pub fn take(&mut self) -> Self {
		Self { group: self.group.take() }
	}

	/// Gives up this handle's group membership.
	///
	/// Decrements the counter, and the handle that takes it to zero
	/// deallocates the payload and the counter. Shared by `Drop` and
	/// `clone_from`, so the decrement/deallocate pairing lives in one place.
	fn release(&mut self) {
		let Some(group) = self.group.take() else { return };
		let remaining = {
			let count = unsafe { group.count.as_ref() };
			let remaining = count.get() - 1;
			count.set(remaining);
			remaining
		};
		if remaining == 0 {
			cold_path();
			unsafe {
				drop(Box::from_raw(group.value.as_ptr()));
				drop(Box::from_raw(group.count.as_ptr()));
			}
			log::trace!("shared handle released, group deallocated");
		} else {
			log::trace!("shared handle released, count: {remaining}");
		}
	}
}

impl<T: ?Sized> Clone for Shared<T> {
	/// Joins the group, incrementing the counter. Cloning an empty handle
	/// yields another empty handle and touches no counter.
	fn clone(&self) -> Self {
		if let Some(group) = self.group {
			let count = unsafe { group.count.as_ref() };
			count.set(count.get() + 1);
			log::trace!("shared handle cloned, count: {}", count.get());
		}
		Self { group: self.group }
	}

	/// Copy-assignment: release the current group, then join `source`'s.
	///
	/// When `self` and `source` are already in the same group this must be a
	/// no-op. Releasing first could take a sole owner's counter to zero and
	/// deallocate the very payload we are about to re-acquire.
	fn clone_from(&mut self, source: &Self) {
		if self.ptr_eq(source) {
			return;
		}
		self.release();
		*self = source.clone();
	}
}

impl<T: ?Sized> Default for Shared<T> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<T: ?Sized> Drop for Shared<T> {
	fn drop(&mut self) {
		self.release();
	}
}

impl<T: ?Sized> Deref for Shared<T> {
	type Target = T;

	/// Dereferencing an empty handle is a precondition violation and panics.
	/// Use [`Shared::get`] or [`Shared::try_get`] when emptiness is expected.
	#[inline]
	fn deref(&self) -> &T {
		match self.group {
			Some(group) => unsafe { group.value.as_ref() },
			None => empty_handle_panic(),
		}
	}
}

#[cold]
#[inline(never)]
#[allow(clippy::panic)]
fn empty_handle_panic() -> ! {
	panic!("dereferenced an empty Shared handle");
}

impl<T: ?Sized + std::fmt::Debug> std::fmt::Debug for Shared<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.get() {
			Some(value) => f
				.debug_struct("Shared")
				.field("count", &self.ref_count())
				.field("value", &value)
				.finish(),
			None => f.write_str("Shared(<empty>)"),
		}
	}
}

//--------------------------------------------------------------------------------------------------
