pub mod docs;
pub mod run;
pub mod spec;
