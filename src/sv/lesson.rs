use serde::Deserialize;
use url::Url;

use crate::entity::{course, lesson, user};
use crate::prelude::*;
use crate::sv::Page;

#[derive(Debug, Deserialize)]
pub struct LessonDraft {
  pub title: String,
  pub description: String,
  pub preview_image: Option<String>,
  pub video_url: String,
  pub course_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct LessonPatch {
  pub title: Option<String>,
  pub description: Option<String>,
  pub preview_image: Option<String>,
  pub video_url: Option<String>,
}

/// Only youtube.com links are accepted as lesson videos. The `url` parser
/// lowercases hosts, so the comparison is case-insensitive by construction.
fn validate_video_url(raw: &str) -> Result<()> {
  let url = Url::parse(raw).map_err(|_| Error::invalid("invalid video URL"))?;

  match url.host_str() {
    Some("youtube.com" | "www.youtube.com") => Ok(()),
    _ => Err(Error::invalid("video URL must point to youtube.com")),
  }
}

pub struct Lesson<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Lesson<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(&self, owner_id: i32, draft: LessonDraft) -> Result<lesson::Model> {
    validate_video_url(&draft.video_url)?;

    if course::Entity::find_by_id(draft.course_id).one(self.db).await?.is_none() {
      return Err(Error::CourseNotFound);
    }

    let lesson = lesson::ActiveModel {
      title: Set(draft.title),
      description: Set(draft.description),
      preview_image: Set(draft.preview_image),
      video_url: Set(draft.video_url),
      course_id: Set(draft.course_id),
      owner_id: Set(Some(owner_id)),
      ..Default::default()
    };

    Ok(lesson.insert(self.db).await?)
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<lesson::Model>> {
    Ok(lesson::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn page(
    &self,
    viewer: &user::Model,
    page: u64,
    per_page: u64,
  ) -> Result<Page<lesson::Model>> {
    let mut query = lesson::Entity::find().order_by_asc(lesson::Column::Id);

    if !viewer.role.is_moderator() {
      query = query.filter(lesson::Column::OwnerId.eq(viewer.id));
    }

    let paginator = query.paginate(self.db, per_page);
    let total = paginator.num_items().await?;
    let pages = paginator.num_pages().await?;
    let items = paginator.fetch_page(page.saturating_sub(1)).await?;

    Ok(Page { items, page, pages, total })
  }

  pub async fn update(&self, lesson: lesson::Model, patch: LessonPatch) -> Result<lesson::Model> {
    if let Some(video_url) = &patch.video_url {
      validate_video_url(video_url)?;
    }

    let mut active = lesson::ActiveModel::from(lesson);

    if let Some(title) = patch.title {
      active.title = Set(title);
    }
    if let Some(description) = patch.description {
      active.description = Set(description);
    }
    if let Some(preview_image) = patch.preview_image {
      active.preview_image = Set(Some(preview_image));
    }
    if let Some(video_url) = patch.video_url {
      active.video_url = Set(video_url);
    }

    Ok(active.update(self.db).await?)
  }

  pub async fn delete(&self, lesson: lesson::Model) -> Result<()> {
    lesson.delete(self.db).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entity::user::UserRole;
  use crate::sv::testing::{memory_db, seed_course, seed_user};

  #[test]
  fn video_url_host_gate() {
    assert!(validate_video_url("https://youtube.com/watch?v=xyz").is_ok());
    assert!(validate_video_url("https://www.youtube.com/watch?v=xyz").is_ok());
    assert!(validate_video_url("https://WWW.YOUTUBE.com/watch?v=1").is_ok());

    assert!(validate_video_url("https://youtu.be/xyz").is_err());
    assert!(validate_video_url("https://vimeo.com/123").is_err());
    assert!(validate_video_url("https://youtube.com.evil.example/watch").is_err());
    assert!(validate_video_url("not a url").is_err());
  }

  #[tokio::test]
  async fn create_requires_existing_course() {
    let db = memory_db().await;
    let owner = seed_user(&db, "owner@example.com", UserRole::Student).await;

    let draft = LessonDraft {
      title: "Intro".into(),
      description: "first lesson".into(),
      preview_image: None,
      video_url: "https://www.youtube.com/watch?v=1".into(),
      course_id: 999,
    };

    assert!(matches!(
      Lesson::new(&db).create(owner.id, draft).await,
      Err(Error::CourseNotFound)
    ));
  }

  #[tokio::test]
  async fn create_and_update_validate_video_url() {
    let db = memory_db().await;
    let sv = Lesson::new(&db);
    let owner = seed_user(&db, "owner@example.com", UserRole::Student).await;
    let course = seed_course(&db, Some(owner.id), "Rust").await;

    let draft = LessonDraft {
      title: "Intro".into(),
      description: "first lesson".into(),
      preview_image: None,
      video_url: "https://youtu.be/xyz".into(),
      course_id: course.id,
    };
    assert!(matches!(
      sv.create(owner.id, draft).await,
      Err(Error::InvalidArgument(_))
    ));

    let draft = LessonDraft {
      title: "Intro".into(),
      description: "first lesson".into(),
      preview_image: None,
      video_url: "https://www.youtube.com/watch?v=1".into(),
      course_id: course.id,
    };
    let lesson = sv.create(owner.id, draft).await.unwrap();
    assert_eq!(lesson.owner_id, Some(owner.id));

    let patch = LessonPatch {
      video_url: Some("https://vimeo.com/123".into()),
      ..Default::default()
    };
    assert!(matches!(
      sv.update(lesson.clone(), patch).await,
      Err(Error::InvalidArgument(_))
    ));

    let patch = LessonPatch {
      title: Some("Intro, revised".into()),
      ..Default::default()
    };
    let updated = sv.update(lesson, patch).await.unwrap();
    assert_eq!(updated.title, "Intro, revised");
  }
}
