pub mod charges;
pub mod defense;
pub mod docket;
pub mod evidence;
pub mod model;
pub mod remedies;
pub mod report;
pub mod verdict;
pub mod workflow;
