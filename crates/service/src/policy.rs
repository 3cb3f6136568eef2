//! Uniform role/ownership checks evaluated against the requesting actor.
//!
//! Handlers declare what they need (business role, customer role, ownership
//! of a resource, staff) instead of each endpoint growing its own ad hoc
//! predicate.

use uuid::Uuid;

use models::{profile, user};

use crate::errors::ServiceError;

/// The authenticated caller: account plus its marketplace profile.
#[derive(Clone, Debug)]
pub struct Actor {
    pub user: user::Model,
    pub profile: profile::Model,
}

impl Actor {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn profile_id(&self) -> Uuid {
        self.profile.id
    }

    pub fn is_staff(&self) -> bool {
        self.user.is_staff
    }

    /// Gate for business-only writes (offer create, order status update).
    pub fn require_business(&self) -> Result<(), ServiceError> {
        if self.profile.is_business() {
            Ok(())
        } else {
            Err(ServiceError::forbidden("only business profiles may perform this action"))
        }
    }

    /// Gate for customer-only writes (order create, review create).
    pub fn require_customer(&self) -> Result<(), ServiceError> {
        if self.profile.is_customer() {
            Ok(())
        } else {
            Err(ServiceError::forbidden("only customer profiles may perform this action"))
        }
    }

    /// Gate for staff-only operations (order delete).
    pub fn require_staff(&self) -> Result<(), ServiceError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(ServiceError::forbidden("staff access required"))
        }
    }

    /// Ownership relation: the actor's profile must be the one that owns
    /// the resource.
    pub fn require_owner(&self, owner_profile_id: Uuid, what: &str) -> Result<(), ServiceError> {
        if self.profile_id() == owner_profile_id {
            Ok(())
        } else {
            Err(ServiceError::Forbidden(format!("not the owner of this {what}")))
        }
    }

    /// Participation relation: the actor must be one of the two order
    /// parties.
    pub fn require_participant(&self, customer_id: Uuid, business_id: Uuid) -> Result<(), ServiceError> {
        let pid = self.profile_id();
        if pid == customer_id || pid == business_id {
            Ok(())
        } else {
            Err(ServiceError::forbidden("not a participant of this order"))
        }
    }
}
