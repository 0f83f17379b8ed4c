pub mod interp;
pub mod typed_value;

pub use interp::Interp;
pub use typed_value::TypedValue;

#[cfg(test)]
mod typed_value_test;
