// Output rendering: report documents and operator tables

pub mod prtg_xml;
pub mod sku_table;

pub use prtg_xml::{serialize, serialize_error};
pub use sku_table::{format_sku_json, format_sku_table};
