pub mod course;
pub mod lesson;
pub mod payment;
pub mod subscription;
pub mod user;

pub use course::Course;
pub use lesson::Lesson;
pub use payment::Payment;
pub use subscription::Subscription;
pub use user::User;

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// One page of a listing; `page` is 1-based.
#[derive(Debug, Serialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub page: u64,
  pub pages: u64,
  pub total: u64,
}

pub fn clamp_page_size(requested: Option<u64>) -> u64 {
  requested.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_size_clamped() {
    assert_eq!(clamp_page_size(None), DEFAULT_PAGE_SIZE);
    assert_eq!(clamp_page_size(Some(0)), 1);
    assert_eq!(clamp_page_size(Some(25)), 25);
    assert_eq!(clamp_page_size(Some(1000)), MAX_PAGE_SIZE);
  }
}
