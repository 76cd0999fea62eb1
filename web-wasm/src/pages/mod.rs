pub mod login;
pub mod visit_detail;
pub mod visits;
