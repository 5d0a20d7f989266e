use ring_kernel::{Kernel, KernelIntrospect};

/// A kernel the ring builder can both drive and query.
///
/// Builders take `&mut dyn KernelBundle` so construction calls and the
/// post-build body/face counts go through one borrow.
pub trait KernelBundle: Kernel + KernelIntrospect {
    fn as_introspect(&self) -> &dyn KernelIntrospect;
}

impl<T: Kernel + KernelIntrospect> KernelBundle for T {
    fn as_introspect(&self) -> &dyn KernelIntrospect {
        self
    }
}
