//! Null guards for optional callbacks.
//!
//! ```ignore
//! let mut on_death: Option<Box<dyn FnMut(u32)>> = None;
//! on_death.invoke(3); // no-op, returns false
//! ```

pub trait CallbackExt<A> {
    /// Call the callback if present. Returns whether it ran.
    fn invoke(&mut self, arg: A) -> bool;
}

impl<A, F: FnMut(A)> CallbackExt<A> for Option<F> {
    fn invoke(&mut self, arg: A) -> bool {
        match self {
            Some(f) => {
                f(arg);
                true
            }
            None => false,
        }
    }
}

pub trait CallbackOrExt<A, R> {
    /// Call the callback if present, otherwise return `default`.
    fn invoke_or(&mut self, arg: A, default: R) -> R;
}

impl<A, R, F: FnMut(A) -> R> CallbackOrExt<A, R> for Option<F> {
    fn invoke_or(&mut self, arg: A, default: R) -> R {
        match self {
            Some(f) => f(arg),
            None => default,
        }
    }
}
