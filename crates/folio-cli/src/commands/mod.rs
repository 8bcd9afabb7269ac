pub mod config;
pub mod decode;
pub mod run;
pub mod sections;
