pub mod project_risk;
pub mod question;
pub mod role;
pub mod shared;
pub mod vendor_risk;
