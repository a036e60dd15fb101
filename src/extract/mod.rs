//! Rule-driven extraction of raw candidates from fetched documents.

pub mod engine;
pub mod json;
pub mod link;
pub mod salary;
pub mod strategy;

pub use engine::{HtmlRules, JsonRules, JsonStrategy, extract};
pub use salary::SalaryRange;
pub use strategy::{Pattern, Strategy, Take, Test};
