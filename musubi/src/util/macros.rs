#![allow(unused_macros)]
#![allow(unused_imports)]

#[macro_export]
macro_rules! hashmap {
    {$( $key: expr => $val: expr ),*} => {{
        std::collections::HashMap::from_iter([$(($key, $val),)*])
    }}
}

pub use hashmap;
