pub mod glossary;
pub mod init;
pub mod prompt;
pub mod session;
pub mod translate;
pub mod utils;
