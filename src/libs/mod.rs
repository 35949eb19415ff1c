pub mod bed;
pub mod config;
pub mod error;
pub mod io;
pub mod maf;
pub mod nt;
pub mod strand;
