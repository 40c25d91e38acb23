//! Domain models for the organization directory.

mod activity;
mod building;
mod organization;

pub use activity::{Activity, ActivityNode, MAX_ACTIVITY_LEVEL};
pub use building::Building;
pub use organization::{NewOrganization, Organization, OrganizationPatch};

pub(crate) use activity::MAX_NAME_LEN as MAX_ACTIVITY_NAME_LEN;
pub(crate) use building::MAX_ADDRESS_LEN;
pub(crate) use organization::MAX_NAME_LEN as MAX_ORGANIZATION_NAME_LEN;
