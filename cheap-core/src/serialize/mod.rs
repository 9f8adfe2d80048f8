pub mod cbor;
pub mod json;

pub use json::{
    catalog_def_from_json, catalog_def_to_json, catalog_from_json, catalog_to_json, hierarchy_from_json,
    hierarchy_to_json, value_from_json, value_to_json, DeserializeContext,
};
