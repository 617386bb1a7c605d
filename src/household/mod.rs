//! The two co-borrowers: cost allocation, ownership tracking and the
//! handling of extra principal payments

mod allocation;
mod extra;
mod ownership;
mod party;

pub use allocation::{allocate, AllocationPolicy, Split};
pub use extra::{apply_treatment, ExtraPaymentTreatment, TreatmentOutcome};
pub use ownership::{
    compare_ownership_models, exact_ownership_series, ownership_from_schedule, ownership_over_time,
    ownership_series, OwnershipInputs, OwnershipModels, OwnershipSnapshot,
};
pub use party::{Household, Party, PartyId};
