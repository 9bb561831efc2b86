// Student form input: the same checks the report form applies client-side,
// enforced again on every request that carries a student record.

pub mod validation;
