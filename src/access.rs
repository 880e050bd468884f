//! Access rules for courses and lessons.
//!
//! The actor is always an authenticated user; anonymous requests never get
//! this far (the `Auth` extractor rejects them with 401). Rules:
//! read/update go to the owner or a moderator, delete to the owner alone.

use crate::entity::user;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
  Read,
  Update,
  Delete,
}

/// Why an action was refused.
///
/// `Hidden` means the actor has no visibility right over the resource at
/// all; callers surface it as not-found so the denial is indistinguishable
/// from a missing resource. `Forbidden` means the resource is visible to
/// the actor but the specific action is not permitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deny {
  Hidden,
  Forbidden,
}

pub fn allows(actor: &user::Model, owner_id: Option<i32>, action: Action) -> bool {
  let owns = owner_id == Some(actor.id);
  match action {
    Action::Read | Action::Update => owns || actor.role.is_moderator(),
    Action::Delete => owns,
  }
}

pub fn check(actor: &user::Model, owner_id: Option<i32>, action: Action) -> Result<(), Deny> {
  if allows(actor, owner_id, action) {
    Ok(())
  } else if allows(actor, owner_id, Action::Read) {
    Err(Deny::Forbidden)
  } else {
    Err(Deny::Hidden)
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::entity::user::UserRole;

  fn actor(id: i32, role: UserRole) -> user::Model {
    user::Model {
      id,
      email: format!("user{id}@example.com"),
      username: format!("user{id}"),
      password_hash: String::new(),
      role,
      phone: None,
      city: None,
      avatar: None,
      is_active: true,
      last_login: None,
      reg_date: Utc::now().naive_utc(),
    }
  }

  #[test]
  fn owner_has_full_rights() {
    let owner = actor(1, UserRole::Student);
    for action in [Action::Read, Action::Update, Action::Delete] {
      assert!(allows(&owner, Some(1), action));
    }
  }

  #[test]
  fn moderator_reads_and_updates_but_cannot_delete() {
    let moder = actor(2, UserRole::Moderator);
    assert!(allows(&moder, Some(1), Action::Read));
    assert!(allows(&moder, Some(1), Action::Update));
    assert!(!allows(&moder, Some(1), Action::Delete));
    assert_eq!(check(&moder, Some(1), Action::Delete), Err(Deny::Forbidden));
  }

  #[test]
  fn stranger_is_hidden_from_everything() {
    let stranger = actor(3, UserRole::Student);
    for action in [Action::Read, Action::Update, Action::Delete] {
      assert_eq!(check(&stranger, Some(1), action), Err(Deny::Hidden));
    }
  }

  #[test]
  fn ownerless_resource_is_moderator_only() {
    let student = actor(1, UserRole::Student);
    let moder = actor(2, UserRole::Moderator);
    assert_eq!(check(&student, None, Action::Read), Err(Deny::Hidden));
    assert!(allows(&moder, None, Action::Update));
    assert!(!allows(&moder, None, Action::Delete));
  }
}
