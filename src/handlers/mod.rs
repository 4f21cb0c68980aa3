// Two security tiers: public (no auth) and protected (JWT + role allow-list)
pub mod protected;
pub mod public;
