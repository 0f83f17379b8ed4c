pub mod list;

pub use list::AttributeList;
