pub mod blog;
pub mod notify;

pub use blog::{BlogClient, BlogPost};
pub use notify::{HttpMailer, Mailer, OutboundEmail};
