use std::hash::Hash;
use derive_more::Display;
use crate::{Elem, ElemBase};

/// A basis element of a free module.
pub trait Gen: Elem + Hash + Ord {}

/// Wraps any hashable, ordered value as a basis element, e.g. `FreeGen(3)`.
#[derive(Debug, Display, Default, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[display("<{_0}>")]
pub struct FreeGen<T>(pub T) where T: ElemBase;

impl<T> From<T> for FreeGen<T> 
where T: ElemBase {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Elem for FreeGen<T> 
where T: ElemBase { 
    fn math_symbol() -> String {
        let full_name = std::any::type_name::<T>();
        let name = full_name.split("::").last().unwrap_or(full_name);
        format!("Free<{name}>")
    }
}

impl<T> Gen for FreeGen<T> 
where T: ElemBase + Hash + Ord {}
