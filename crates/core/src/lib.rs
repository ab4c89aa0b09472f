//! Domain rules of the registrar: value types, grading, credit load,
//! GPA, account validation and the registration batch.

pub mod domain;
