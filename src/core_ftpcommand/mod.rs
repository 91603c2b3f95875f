// Here's the list of the FTP commands implemented
pub mod cdup;
pub mod cwd;
pub mod dele;
pub mod feat;
pub mod list;
pub mod mdtm;
pub mod mkd;
pub mod noop;
pub mod pass;
pub mod pwd;
pub mod quit;
pub mod retr;
pub mod rmd;
pub mod rnfr;
pub mod rnto;
pub mod size;
pub mod stat;
pub mod stor;
pub mod syst;
pub mod type_;
pub mod user;

// Command table and dispatch
pub mod ftpcommand;
pub mod handlers;

// The utils and common functions are here
pub mod utils;
