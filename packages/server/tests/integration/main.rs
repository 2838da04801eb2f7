mod common;
mod question;
mod role;
