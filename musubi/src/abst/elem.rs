use std::fmt::{Debug, Display};

pub trait ElemBase: 
    Default + 
    PartialEq + 
    Eq + 
    Clone + 
    Send + 
    Sync + 
    Display + 
    Debug + 
    'static
{}

impl<T> ElemBase for T where T: 
    Default + 
    PartialEq + 
    Eq + 
    Clone + 
    Send + 
    Sync + 
    Display + 
    Debug + 
    'static
{}

/// Anything that can be stored as a coefficient or a generator.
pub trait Elem: ElemBase { 
    fn math_symbol() -> String;
}
