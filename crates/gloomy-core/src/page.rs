//! Offset pagination.

use serde::{Deserialize, Serialize};

/// Zero-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  pub page: u32,
  pub size: u32,
}

impl PageRequest {
  pub const DEFAULT_SIZE: u32 = 20;

  pub fn new(page: u32, size: u32) -> Self { Self { page, size } }

  /// A usable request has a non-zero page size and an offset that fits a
  /// signed 64-bit SQL parameter.
  pub fn is_valid(&self) -> bool {
    self.size > 0 && i64::try_from(self.offset()).is_ok()
  }

  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.size) }

  pub fn limit(&self) -> u64 { u64::from(self.size) }
}

impl Default for PageRequest {
  fn default() -> Self { Self::new(0, Self::DEFAULT_SIZE) }
}

/// One page of results plus the size of the full result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub content:        Vec<T>,
  pub page:           u32,
  pub size:           u32,
  pub total_elements: u64,
}

impl<T> Page<T> {
  pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
    Self {
      content,
      page: request.page,
      size: request.size,
      total_elements,
    }
  }

  pub fn total_pages(&self) -> u64 {
    if self.size == 0 {
      return 0;
    }
    self.total_elements.div_ceil(u64::from(self.size))
  }

  pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
    Page {
      content:        self.content.into_iter().map(f).collect(),
      page:           self.page,
      size:           self.size,
      total_elements: self.total_elements,
    }
  }
}
