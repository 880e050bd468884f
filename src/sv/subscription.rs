use crate::entity::{course, subscription, user};
use crate::prelude::*;

/// Result of a toggle call. Two identical calls are an involution, not an
/// idempotent pair: the second one undoes the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
  Added,
  Removed,
}

impl Toggle {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Added => "added",
      Self::Removed => "removed",
    }
  }
}

pub struct Subscription<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Subscription<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Existence check and mutation run in one transaction; a losing racer
  /// hits the (user_id, course_id) primary key and gets a database error
  /// instead of creating a second row.
  pub async fn toggle(&self, user_id: i32, course_id: i32) -> Result<Toggle> {
    let txn = self.db.begin().await?;

    if course::Entity::find_by_id(course_id).one(&txn).await?.is_none() {
      return Err(Error::CourseNotFound);
    }

    let toggle = match subscription::Entity::find_by_id((user_id, course_id))
      .one(&txn)
      .await?
    {
      Some(existing) => {
        existing.delete(&txn).await?;
        Toggle::Removed
      }
      None => {
        subscription::ActiveModel {
          user_id: Set(user_id),
          course_id: Set(course_id),
          subscribed_at: Set(Utc::now().naive_utc()),
        }
        .insert(&txn)
        .await?;
        Toggle::Added
      }
    };

    txn.commit().await?;
    Ok(toggle)
  }

  pub async fn is_subscribed(&self, user_id: i32, course_id: i32) -> Result<bool> {
    let found = subscription::Entity::find_by_id((user_id, course_id))
      .one(self.db)
      .await?;
    Ok(found.is_some())
  }

  pub async fn subscribers(&self, course_id: i32) -> Result<Vec<user::Model>> {
    let users = subscription::Entity::find()
      .filter(subscription::Column::CourseId.eq(course_id))
      .find_also_related(user::Entity)
      .all(self.db)
      .await?
      .into_iter()
      .filter_map(|(_, user)| user)
      .collect();

    Ok(users)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entity::user::UserRole;
  use crate::sv::testing::{memory_db, seed_course, seed_user};

  #[tokio::test]
  async fn toggle_alternates_state() {
    let db = memory_db().await;
    let sv = Subscription::new(&db);

    let user = seed_user(&db, "alice@example.com", UserRole::Student).await;
    let course = seed_course(&db, None, "Rust").await;

    assert_eq!(sv.toggle(user.id, course.id).await.unwrap(), Toggle::Added);
    assert!(sv.is_subscribed(user.id, course.id).await.unwrap());

    assert_eq!(sv.toggle(user.id, course.id).await.unwrap(), Toggle::Removed);
    assert!(!sv.is_subscribed(user.id, course.id).await.unwrap());

    // odd call count subscribed, even call count not
    for round in 1..=6 {
      sv.toggle(user.id, course.id).await.unwrap();
      assert_eq!(sv.is_subscribed(user.id, course.id).await.unwrap(), round % 2 == 1);
    }
  }

  #[tokio::test]
  async fn toggle_unknown_course_is_not_found() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice@example.com", UserRole::Student).await;

    assert!(matches!(
      Subscription::new(&db).toggle(user.id, 999).await,
      Err(Error::CourseNotFound)
    ));
  }

  #[tokio::test]
  async fn duplicate_row_rejected_by_primary_key() {
    let db = memory_db().await;
    let user = seed_user(&db, "alice@example.com", UserRole::Student).await;
    let course = seed_course(&db, None, "Rust").await;

    let row = subscription::ActiveModel {
      user_id: Set(user.id),
      course_id: Set(course.id),
      subscribed_at: Set(Utc::now().naive_utc()),
    };
    row.clone().insert(&db).await.unwrap();

    assert!(row.insert(&db).await.is_err());
    assert_eq!(subscription::Entity::find().all(&db).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn subscribers_lists_subscribed_users() {
    let db = memory_db().await;
    let sv = Subscription::new(&db);

    let alice = seed_user(&db, "alice@example.com", UserRole::Student).await;
    let bob = seed_user(&db, "bob@example.com", UserRole::Student).await;
    let course = seed_course(&db, None, "Rust").await;
    let other = seed_course(&db, None, "Git").await;

    sv.toggle(alice.id, course.id).await.unwrap();
    sv.toggle(bob.id, other.id).await.unwrap();

    let subscribers = sv.subscribers(course.id).await.unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].email, "alice@example.com");
  }
}
