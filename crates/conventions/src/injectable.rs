use std::fmt;

use serde_json::Value;

use crate::naming::short_type_name;
use crate::service::Service;

pub(crate) mod sealed {
    use std::any::{Any, TypeId};

    /// Concrete type identity, answered by the blanket impl only.
    pub trait Identity {
        fn concrete_type_name(&self) -> &'static str;
        fn concrete_type_id(&self) -> TypeId;
    }

    impl<T: Any> Identity for T {
        fn concrete_type_name(&self) -> &'static str {
            std::any::type_name::<T>()
        }

        fn concrete_type_id(&self) -> TypeId {
            TypeId::of::<T>()
        }
    }
}

use sealed::Identity;

/// Object that a [`Container`](crate::Container) may hand to a controller.
///
/// Implement it with [`injectable!`](crate::injectable), which detects at the
/// expansion site whether the type implements [`Service`].
pub trait Injectable: Identity + Send + Sync + 'static {
    #[doc(hidden)]
    fn as_service(&self) -> Option<&dyn Service> {
        None
    }
}

impl dyn Injectable {
    /// Concrete type name without module path or generic arguments.
    pub fn type_name(&self) -> &'static str {
        short_type_name(self.concrete_type_name())
    }
}

/// Implement [`Injectable`] for one or more concrete types.
///
/// Types implementing [`Service`] are exposed as services, everything else as
/// plain components.
#[macro_export]
macro_rules! injectable {
    ($($ty:ty),+ $(,)?) => {
        $(impl $crate::Injectable for $ty {
            fn as_service(&self) -> ::core::option::Option<&dyn $crate::Service> {
                #[allow(unused_imports)]
                use $crate::injectable::__private::{ViaPlain as _, ViaService as _};
                (&$crate::injectable::__private::Detect(self)).service_view()
            }
        })+
    };
}

// Autoref specialization: method lookup finds `ViaService` on `Detect<T>`
// when `T: Service`, otherwise the extra autoref reaches `ViaPlain`.
#[doc(hidden)]
pub mod __private {
    use crate::service::Service;

    pub struct Detect<'a, T>(pub &'a T);

    pub trait ViaService<'a> {
        fn service_view(&self) -> Option<&'a dyn Service>;
    }

    impl<'a, T: Service> ViaService<'a> for Detect<'a, T> {
        fn service_view(&self) -> Option<&'a dyn Service> {
            Some(self.0)
        }
    }

    pub trait ViaPlain<'a> {
        fn service_view(&self) -> Option<&'a dyn Service> {
            None
        }
    }

    impl<'a, T> ViaPlain<'a> for &Detect<'a, T> {}
}

/// A dependency as seen by validation: possibly absent, possibly a bare value.
#[derive(Clone, Copy)]
pub enum Candidate<'a> {
    Null,
    /// Plain data bound in the container (numbers, strings, JSON documents).
    Value(&'a Value),
    Instance(&'a dyn Injectable),
}

impl<'a> Candidate<'a> {
    pub fn of<T: Injectable>(object: &'a T) -> Self {
        Candidate::Instance(object)
    }
}

impl<'a, T: Injectable> From<Option<&'a T>> for Candidate<'a> {
    fn from(value: Option<&'a T>) -> Self {
        value.map_or(Candidate::Null, Candidate::of)
    }
}

impl<'a> From<&'a Value> for Candidate<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Candidate::Null,
            other => Candidate::Value(other),
        }
    }
}

impl fmt::Debug for Candidate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Null => f.write_str("Null"),
            Candidate::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Candidate::Instance(o) => f.debug_tuple("Instance").field(&o.type_name()).finish(),
        }
    }
}
