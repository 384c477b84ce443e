//! `?page=&size=` query parameters.

use gloomy_core::page::PageRequest;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
  pub page: Option<u32>,
  pub size: Option<u32>,
}

impl From<PageParams> for PageRequest {
  fn from(p: PageParams) -> Self {
    PageRequest::new(
      p.page.unwrap_or(0),
      p.size.unwrap_or(PageRequest::DEFAULT_SIZE),
    )
  }
}
