//! Shared handles to the objects tweens animate.
//!
//! Targets are owned by the host. Tweens keep a cloned handle while bound
//! and the controller only ever compares identities.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TARGET_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a target handle.
///
/// Assigned from a process-wide counter when the target is created and
/// shared by every clone of the handle. Ids are never reused, so an id held
/// by another thread (see [`CommandSender`](crate::scheduler::CommandSender))
/// can never match a target created after the original was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

struct Shared<T> {
    id: TargetId,
    value: RefCell<T>,
}

/// Shared, identity-comparable handle to a host object.
pub struct Target<T>(Rc<Shared<T>>);

impl<T> Target<T> {
    pub fn new(value: T) -> Self {
        let id = TargetId(NEXT_TARGET_ID.fetch_add(1, Ordering::Relaxed));
        Self(Rc::new(Shared {
            id,
            value: RefCell::new(value),
        }))
    }

    pub fn id(&self) -> TargetId {
        self.0.id
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.value.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.value.borrow_mut()
    }

    /// Whether both handles refer to the same object.
    pub fn same(&self, other: &Target<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Target<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Target")
            .field(&self.0.id)
            .field(&self.0.value.borrow())
            .finish()
    }
}

impl<T> From<&Target<T>> for TargetId {
    fn from(target: &Target<T>) -> Self {
        target.id()
    }
}
