//! Course-update notifications.
//!
//! Fire-and-forget relative to the triggering request: a failed send is
//! logged, never rolled back against the course update that queued it.

use std::sync::Arc;

use crate::mail::Mailer;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
  Sent(usize),
  CourseNotFound,
  NoRecipients,
}

pub async fn course_update(
  db: &DatabaseConnection,
  mailer: &dyn Mailer,
  course_id: i32,
) -> Result<Outcome> {
  let Some(course) = sv::Course::new(db).by_id(course_id).await? else {
    return Ok(Outcome::CourseNotFound);
  };

  let recipients: Vec<String> = sv::Subscription::new(db)
    .subscribers(course_id)
    .await?
    .into_iter()
    .map(|user| user.email)
    .filter(|email| !email.is_empty())
    .collect();

  if recipients.is_empty() {
    return Ok(Outcome::NoRecipients);
  }

  let subject = format!("Course update: {}", course.title);
  let body = format!(
    "Hello!\n\nThe course '{}' has been updated. \
     Visit the platform to check out the new materials.\n\n\
     Thank you for staying with us!",
    course.title
  );

  mailer
    .send(&subject, &body, &recipients)
    .await
    .map_err(|err| Error::Internal(format!("mail send failed: {err:#}")))?;

  Ok(Outcome::Sent(recipients.len()))
}

/// Queues the notification off the request path.
pub fn dispatch(app: Arc<AppState>, course_id: i32) {
  tokio::spawn(async move {
    match course_update(&app.db, app.mailer.as_ref(), course_id).await {
      Ok(Outcome::Sent(count)) => info!("Course {course_id}: notified {count} subscribers"),
      Ok(Outcome::CourseNotFound) => warn!("Course {course_id}: gone before notification"),
      Ok(Outcome::NoRecipients) => debug!("Course {course_id}: no subscribers with email"),
      Err(err) => error!("Course {course_id}: notification failed: {err}"),
    }
  });
}
