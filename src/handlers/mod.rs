// Two handler tiers: public (no session required) and admin (valid bearer
// session with the admin role, enforced by a shared route layer).
pub mod admin;
pub mod public;
