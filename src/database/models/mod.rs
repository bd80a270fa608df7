pub mod cms;
pub mod contact;
pub mod pricing;
pub mod team;
pub mod user;

pub use cms::CmsSection;
pub use contact::Contact;
pub use pricing::PricingPlan;
pub use team::TeamMember;
pub use user::User;
