mod logging;
pub mod run;
