pub mod backend;
pub mod catalog_data;
pub mod eligibility;
pub mod search;
pub mod selection;
