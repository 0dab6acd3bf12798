pub mod institution;

pub use institution::{
    Institution, InstitutionPatch, InstitutionProfile, NewInstitution, PendingPayment,
};
