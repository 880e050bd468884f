use serde::Deserialize;

use crate::entity::{course, user};
use crate::prelude::*;
use crate::sv::Page;

#[derive(Debug, Deserialize)]
pub struct CourseDraft {
  pub title: String,
  pub description: String,
  pub preview_image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CoursePatch {
  pub title: Option<String>,
  pub description: Option<String>,
  pub preview_image: Option<String>,
}

pub struct Course<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Course<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, owner_id: i32, draft: CourseDraft) -> Result<course::Model> {
    if draft.title.trim().is_empty() {
      return Err(Error::invalid("title must not be empty"));
    }

    let course = course::ActiveModel {
      title: Set(draft.title.trim().to_string()),
      description: Set(draft.description),
      preview_image: Set(draft.preview_image),
      owner_id: Set(Some(owner_id)),
      ..Default::default()
    };

    Ok(course.insert(self.db).await?)
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<course::Model>> {
    Ok(course::Entity::find_by_id(id).one(self.db).await?)
  }

  /// Moderators see the whole catalog; everyone else their own courses.
  pub async fn page(
    &self,
    viewer: &user::Model,
    page: u64,
    per_page: u64,
  ) -> Result<Page<course::Model>> {
    let mut query = course::Entity::find().order_by_asc(course::Column::Id);

    if !viewer.role.is_moderator() {
      query = query.filter(course::Column::OwnerId.eq(viewer.id));
    }

    let paginator = query.paginate(self.db, per_page);
    let total = paginator.num_items().await?;
    let pages = paginator.num_pages().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok(Page { items, page, pages, total })
  }

  pub async fn update(&self, course: course::Model, patch: CoursePatch) -> Result<course::Model> {
    let mut active = course::ActiveModel::from(course);

    if let Some(title) = patch.title {
      if title.trim().is_empty() {
        return Err(Error::invalid("title must not be empty"));
      }
      active.title = Set(title.trim().to_string());
    }
    if let Some(description) = patch.description {
      active.description = Set(description);
    }
    if let Some(preview_image) = patch.preview_image {
      active.preview_image = Set(Some(preview_image));
    }

    Ok(active.update(self.db).await?)
  }

  /// Lessons and subscriptions go with the course (FK cascade).
  pub async fn delete(&self, course: course::Model) -> Result<()> {
    course.delete(self.db).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entity::user::UserRole;
  use crate::entity::{lesson, subscription};
  use crate::sv::testing::{memory_db, seed_course, seed_user};

  #[tokio::test]
  async fn create_rejects_empty_title() {
    let db = memory_db().await;
    let owner = seed_user(&db, "owner@example.com", UserRole::Student).await;

    let draft = CourseDraft {
      title: "   ".into(),
      description: "whitespace only".into(),
      preview_image: None,
    };

    assert!(matches!(
      Course::new(&db).create(owner.id, draft).await,
      Err(Error::InvalidArgument(_))
    ));
  }

  #[tokio::test]
  async fn listing_is_scoped_by_role() {
    let db = memory_db().await;
    let sv = Course::new(&db);

    let owner = seed_user(&db, "owner@example.com", UserRole::Student).await;
    let other = seed_user(&db, "other@example.com", UserRole::Student).await;
    let moder = seed_user(&db, "moder@example.com", UserRole::Moderator).await;

    seed_course(&db, Some(owner.id), "Rust").await;
    seed_course(&db, Some(owner.id), "Git").await;
    seed_course(&db, Some(other.id), "SQL").await;

    assert_eq!(sv.page(&owner, 1, 10).await.unwrap().total, 2);
    assert_eq!(sv.page(&other, 1, 10).await.unwrap().total, 1);
    assert_eq!(sv.page(&moder, 1, 10).await.unwrap().total, 3);
  }

  #[tokio::test]
  async fn pagination_splits_pages() {
    let db = memory_db().await;
    let sv = Course::new(&db);
    let moder = seed_user(&db, "moder@example.com", UserRole::Moderator).await;

    for i in 0..5 {
      seed_course(&db, None, &format!("Course {i}")).await;
    }

    let page = sv.page(&moder, 2, 2).await.unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.pages, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].title, "Course 2");
  }

  #[tokio::test]
  async fn delete_cascades_to_lessons_and_subscriptions() {
    let db = memory_db().await;
    let sv = Course::new(&db);

    let owner = seed_user(&db, "owner@example.com", UserRole::Student).await;
    let course = seed_course(&db, Some(owner.id), "Rust").await;

    lesson::ActiveModel {
      title: Set("Intro".into()),
      description: Set("first lesson".into()),
      video_url: Set("https://www.youtube.com/watch?v=1".into()),
      course_id: Set(course.id),
      owner_id: Set(Some(owner.id)),
      ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    subscription::ActiveModel {
      user_id: Set(owner.id),
      course_id: Set(course.id),
      subscribed_at: Set(Utc::now().naive_utc()),
    }
    .insert(&db)
    .await
    .unwrap();

    sv.delete(course.clone()).await.unwrap();

    assert!(sv.by_id(course.id).await.unwrap().is_none());
    assert_eq!(lesson::Entity::find().all(&db).await.unwrap().len(), 0);
    assert_eq!(subscription::Entity::find().all(&db).await.unwrap().len(), 0);
  }
}
