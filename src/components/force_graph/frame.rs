//! Ownership for the self-rescheduling animation frame callback.
//!
//! The callback re-requests itself every frame, so it needs a way back to its
//! own slot. It only ever holds a [`Weak`] to the [`FrameSlot`]; dropping the
//! last strong handle frees the callback and everything it captured, and
//! cancels the frame that was still pending.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Shared owner of a [`FrameLoop`].
pub type FrameSlot<C> = Rc<RefCell<Option<FrameLoop<C>>>>;

/// A frame callback and the handle of its pending `requestAnimationFrame`.
pub struct FrameLoop<C> {
	callback: C,
	pending: Cell<Option<i32>>,
}

impl<C> FrameLoop<C> {
	/// Wrap `callback`; nothing is scheduled yet.
	pub fn new(callback: C) -> Self {
		Self {
			callback,
			pending: Cell::new(None),
		}
	}

	/// The callback to hand to the browser.
	pub fn callback(&self) -> &C {
		&self.callback
	}

	/// Record the handle of the frame just requested.
	pub fn set_pending(&self, handle: Option<i32>) {
		self.pending.set(handle);
	}
}

impl<C> Drop for FrameLoop<C> {
	fn drop(&mut self) {
		let Some(handle) = self.pending.take() else {
			return;
		};
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(handle);
		}
	}
}

/// An empty slot and the weak handle its callback should capture.
pub fn slot<C>() -> (FrameSlot<C>, Weak<RefCell<Option<FrameLoop<C>>>>) {
	let slot = Rc::new(RefCell::new(None));
	let weak = Rc::downgrade(&slot);
	(slot, weak)
}

#[cfg(test)]
mod tests {
	use super::*;

	type Callback = Box<dyn Fn() -> bool>;

	#[test]
	fn callback_reaches_its_slot_while_owned() {
		let (owner, weak) = slot::<Callback>();
		*owner.borrow_mut() = Some(FrameLoop::new(Box::new(move || weak.upgrade().is_some())));

		let alive = owner.borrow().as_ref().map(|frame| (frame.callback())());
		assert_eq!(alive, Some(true));
		assert_eq!(Rc::strong_count(&owner), 1);
	}

	#[test]
	fn dropping_the_owner_frees_the_callback_and_its_captures() {
		let state = Rc::new(());
		let (owner, weak) = slot::<Callback>();
		let held = state.clone();
		*owner.borrow_mut() = Some(FrameLoop::new(Box::new(move || {
			let _ = &held;
			weak.upgrade().is_some()
		})));
		assert_eq!(Rc::strong_count(&state), 2);

		drop(owner);
		assert_eq!(Rc::strong_count(&state), 1);
	}

	#[test]
	fn replacing_the_loop_frees_the_previous_callback() {
		let first = Rc::new(());
		let (owner, weak) = slot::<Callback>();
		let held = first.clone();
		*owner.borrow_mut() = Some(FrameLoop::new(Box::new(move || {
			let _ = &held;
			weak.upgrade().is_some()
		})));

		*owner.borrow_mut() = Some(FrameLoop::new(Box::new(|| false)));
		assert_eq!(Rc::strong_count(&first), 1);
	}
}
