pub mod applicant;
pub mod record;
